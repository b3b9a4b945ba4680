//! # Fibre DI
//!
//! A minimal, string-keyed dependency injection container for Rust.
//!
//! A [`Container`] stores either plain values or definitions: closures that
//! receive the container and produce a value. Definitions are resolved lazily
//! the first time they are requested.
//!
//! ## Core Concepts
//!
//! - **Values**: anything `'static`, held as a dynamically typed [`Value`].
//! - **Shared definitions** ([`share`], the default): invoked once, then the
//!   same instance is returned until the identifier is replaced or removed.
//! - **Factories** ([`factory`]): invoked on every resolution.
//! - **Protected definitions** ([`protect`]): stored as opaque values and never
//!   invoked by the container.
//! - **Extensions** ([`Container::extend`]): decorate an existing definition
//!   with additional logic after it has been registered.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_di::{factory, Container, Value};
//! use std::rc::Rc;
//!
//! struct Mailer {
//!   transport: String,
//! }
//!
//! let container = Container::new();
//! container.set_value("mailer.transport", String::from("smtp"));
//!
//! // Definitions receive the container and can resolve other entries.
//! container.set_definition("mailer", |c| {
//!   let transport = c.get_as::<String>("mailer.transport")?;
//!   Ok(Value::new(Mailer { transport: (*transport).clone() }))
//! });
//!
//! // A fresh id on every resolution.
//! container.set("request.id", factory(|_| Ok(Value::new(rand_id()))));
//! # fn rand_id() -> u64 { 4 }
//!
//! let first = container.get_as::<Mailer>("mailer").unwrap();
//! let second = container.get_as::<Mailer>("mailer").unwrap();
//! assert_eq!(first.transport, "smtp");
//! assert!(Rc::ptr_eq(&first, &second));
//! ```

mod container;
mod core;
mod definition;
mod error;
mod global;
#[cfg(feature = "json")]
mod json;
mod macros;

pub use crate::core::{Kind, Value};
pub use container::Container;
pub use definition::{factory, protect, share, Definition, Entry};
pub use error::{Error, Result};
pub use global::global;
