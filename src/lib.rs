//! Propkeeper – declared properties, hydrated through setters and read through an allow-list.
//!
//! A type becomes a *container* by implementing [`container::Container`]:
//! * It declares every property once in a [`schema::Schema`], together with
//!   the [`schema::Visibility`] of each and the setters hydration may call.
//! * It names the properties that stay hidden from outside readers.
//!
//! Wrapping a value in an [`container::Instance`] then gives:
//! * bulk construction from a data map, each key routed to its setter;
//! * `get` / `has` restricted to the allow-list;
//! * serialization of exactly the allow-listed properties.
//!
//! ## Modules
//! * [`container`] – The `Container` contract, the hydrator and the `Instance` proxy.
//! * [`schema`] – Property declarations, visibility and inheritance by composition.
//! * [`visibility`] – Resolution of the allow-list from a schema and hidden names.
//! * [`keeper`] – Type keyed cache so each type is declared and resolved once.
//! * [`case`] – `event-name` / `eventName` conversion helpers.
//! * [`loader`] – Hydration from configuration files and the environment.
//!
//! ## Allow-list
//! The allow-list of a concrete type is every public or protected property it
//! carries, inherited ones included, minus [`visibility::ALLOW_LIST_PROPERTY`]
//! and minus its hidden names. It is resolved before hydration and never
//! changes afterwards.
//!
//! ## Errors
//! Only two things can go wrong, see [`ContainerError`]: a name that is not a
//! (readable) property, and a property hydration has no setter for.
//!
//! ## Quick Start
//! ```
//! use propkeeper::{Container, Instance, SchemaBuilder};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct Event {
//!     event_name: String,
//!     token: String,
//! }
//!
//! impl Container for Event {
//!     fn declare(schema: SchemaBuilder<Self>) -> SchemaBuilder<Self> {
//!         schema
//!             .protected("eventName", |e| e.event_name.clone())
//!             .protected("token", |e| e.token.clone())
//!             .setter("eventName", |e, v| e.event_name = v.as_str().unwrap_or_default().to_owned())
//!             .setter("token", |e, v| e.token = v.as_str().unwrap_or_default().to_owned())
//!     }
//!     fn hidden_property_names() -> Vec<&'static str> {
//!         vec!["token"]
//!     }
//! }
//!
//! let event = Instance::<Event>::new([
//!     ("eventName", json!("launch")),
//!     ("token", json!("s3cr3t")),
//! ]).unwrap();
//! assert_eq!(event.get("eventName").unwrap(), json!("launch"));
//! assert!(!event.has("token"));
//! assert_eq!(serde_json::to_value(&event).unwrap(), json!({ "eventName": "launch" }));
//! ```

pub mod case;
pub mod container;
pub mod error;
pub mod keeper;
pub mod loader;
pub mod schema;
pub mod visibility;

pub use container::{Container, Instance, hydrate};
pub use error::{ContainerError, Result};
pub use schema::{Schema, SchemaBuilder, Visibility};
pub use visibility::{ALLOW_LIST_PROPERTY, AllowList};
