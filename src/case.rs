//! Name conversion between markup-attribute style (`event-name`) and
//! property style (`eventName`).
//!
//! The two transforms are independent best-effort rewrites and are not
//! inverses of each other. Consecutive capitals, leading capitals and digits
//! next to letters are left to whatever the patterns below happen to do.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // a dash directly followed by a letter
    static ref DASHED_LETTER: Regex = Regex::new(r"-([A-Za-z])").unwrap();
    // an uppercase letter directly preceded by a lowercase letter
    static ref WORD_BOUNDARY: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
}

/// `"event-name"` becomes `"eventName"`.
pub fn field_to_property(field: &str) -> String {
    DASHED_LETTER
        .replace_all(field, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// `"eventName"` becomes `"event-name"`.
pub fn property_to_field(property: &str) -> String {
    WORD_BOUNDARY
        .replace_all(property, |caps: &Captures| {
            format!("{}-{}", &caps[1], caps[2].to_lowercase())
        })
        .into_owned()
}

/// Conventional mutator name for a property, `"eventName"` gives `"setEventName"`.
pub fn setter_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("set{}{}", first.to_uppercase(), chars.as_str()),
        None => String::from("set"),
    }
}
