#![allow(dead_code)]

use std::cell::Cell;

use propkeeper::{Container, SchemaBuilder};
use serde_json::Value;

fn string(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_owned()
}

// ------------- Event -------------
#[derive(Debug, Default, Clone)]
pub struct Event {
    pub event_name: String,
    pub venue: String,
    pub capacity: i64,
    pub api_key: String,
    pub revision: u64,
    pub created_by: String,
}

impl Container for Event {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .public("eventName", |e| e.event_name.clone())
            .protected("venue", |e| e.venue.clone())
            .protected("capacity", |e| e.capacity)
            .protected("apiKey", |e| e.api_key.clone())
            .private("revision", |e| e.revision)
            // read only, there is deliberately no setter
            .protected("createdBy", |e| e.created_by.clone())
            .setter("eventName", |e, v| e.event_name = string(&v))
            .setter("venue", |e, v| e.venue = string(&v))
            .setter("capacity", |e, v| e.capacity = v.as_i64().unwrap_or_default())
            .setter("apiKey", |e, v| e.api_key = string(&v))
            .setter("revision", |e, v| e.revision = v.as_u64().unwrap_or_default())
    }
    fn hidden_property_names() -> Vec<&'static str> {
        vec!["apiKey"]
    }
}

// ------------- Concert -------------
#[derive(Debug, Default, Clone)]
pub struct Concert {
    pub event: Event,
    pub headliner: String,
    pub ticket_price: f64,
}

impl Container for Concert {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .extends::<Event>(|c| &c.event, |c| &mut c.event)
            .protected("headliner", |c| c.headliner.clone())
            .protected("ticketPrice", |c| c.ticket_price)
            .setter("headliner", |c, v| c.headliner = string(&v))
            .setter("ticketPrice", |c, v| c.ticket_price = v.as_f64().unwrap_or_default())
    }
    fn hidden_property_names() -> Vec<&'static str> {
        let mut hidden = Event::hidden_property_names();
        hidden.push("ticketPrice");
        hidden
    }
}

// ------------- Workshop -------------
// Sibling of Concert. It hides something else entirely and does not carry
// over the hidden names of Event.
#[derive(Debug, Default, Clone)]
pub struct Workshop {
    pub event: Event,
    pub instructor: String,
    pub seats: i64,
}

impl Container for Workshop {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .extends::<Event>(|w| &w.event, |w| &mut w.event)
            .public("instructor", |w| w.instructor.clone())
            // overrides the inherited capacity with the workshop's own seats
            .protected("capacity", |w| w.seats)
            .setter("instructor", |w, v| w.instructor = string(&v))
            .setter("capacity", |w, v| w.seats = v.as_i64().unwrap_or_default())
    }
    fn hidden_property_names() -> Vec<&'static str> {
        vec!["venue"]
    }
}

// ------------- Journal -------------
// Records the order setters are called in.
#[derive(Debug, Default)]
pub struct Journal {
    pub calls: Vec<String>,
}

impl Container for Journal {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .protected("first", |_| Value::Null)
            .protected("second", |_| Value::Null)
            .protected("third", |_| Value::Null)
            .setter("first", |j, v| j.calls.push(format!("first={v}")))
            .setter("second", |j, v| j.calls.push(format!("second={v}")))
            .setter("third", |j, v| j.calls.push(format!("third={v}")))
    }
}

// ------------- Vault -------------
// Nothing readable at all.
#[derive(Debug, Default)]
pub struct Vault {
    pub secret: String,
    pub pin: i64,
}

impl Container for Vault {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .private("secret", |v| v.secret.clone())
            .protected("pin", |v| v.pin)
            .setter("secret", |vault, v| vault.secret = string(&v))
            .setter("pin", |vault, v| vault.pin = v.as_i64().unwrap_or_default())
    }
    fn hidden_property_names() -> Vec<&'static str> {
        vec!["pin"]
    }
}

// ------------- Sneaky -------------
// Declares a property under the bookkeeping name.
#[derive(Debug, Default)]
pub struct Sneaky {
    pub label: String,
    pub names: Vec<String>,
}

impl Container for Sneaky {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .public("label", |s| s.label.clone())
            .public(propkeeper::ALLOW_LIST_PROPERTY, |s| s.names.clone())
            .setter("label", |s, v| s.label = string(&v))
    }
}

// ------------- Misdeclared -------------
// Registers a setter for a property it never declares.
#[derive(Debug, Default)]
pub struct Misdeclared {
    pub title: String,
}

impl Container for Misdeclared {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .public("title", |m| m.title.clone())
            .setter("title", |m, v| m.title = string(&v))
            .setter("subtitle", |m, v| m.title = string(&v))
    }
}

// ------------- Orphan -------------
// Extends a type whose declaration fails.
#[derive(Debug, Default)]
pub struct Orphan {
    pub parent: Misdeclared,
}

impl Container for Orphan {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema.extends::<Misdeclared>(|o| &o.parent, |o| &mut o.parent)
    }
}

// ------------- Turnstile -------------
// Changes its own state through &self, as a type's internal logic may.
#[derive(Debug, Default)]
pub struct Turnstile {
    pub passes: Cell<i64>,
}

impl Turnstile {
    pub fn pass(&self) {
        self.passes.set(self.passes.get() + 1);
    }
}

impl Container for Turnstile {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .public("passes", |t| t.passes.get())
            .setter("passes", |t, v| t.passes.set(v.as_i64().unwrap_or_default()))
    }
}

// ------------- Ouroboros -------------
// Claims to extend itself.
#[derive(Debug, Default)]
pub struct Ouroboros {
    pub tail: i64,
}

impl Container for Ouroboros {
    fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
        schema
            .extends::<Ouroboros>(|o| o, |o| o)
            .public("tail", |o| o.tail)
    }
}

// RUST_LOG=propkeeper=trace shows hydration while the tests run
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
