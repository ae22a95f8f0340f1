//! Types and traits for reading loosely typed request data and writing flat span attributes.
//!
//! This crate provides the dynamic value model shared by the rest of the workspace:
//!
//!  - [`Value`] and [`Object`] are owned, JSON-like values. They are what request and response
//!    payloads look like when they are not backed by typed structures.
//!  - [`Val`] is the borrowed view returned when reading a field, and [`Getter`] is the trait for
//!    anything that exposes named fields, including typed structures.
//!  - [`resolve`] walks a dotted [path](resolve#syntax) through nested getters and containers.
//!  - [`Attributes`] is the flat, namespaced map of [`AttributeValue`]s that ends up on a span.
//!
//! # Example
//!
//! ```
//! use spantag_protocol::{resolve, Val, Value};
//!
//! let payload: Value = serde_json::from_str(r#"{"ProvisionedThroughput": {"ReadCapacityUnits": 5}}"#)
//!     .unwrap();
//!
//! let units = resolve(&payload, "ProvisionedThroughput.ReadCapacityUnits");
//! assert_eq!(units, Some(Val::I64(5)));
//! assert_eq!(resolve(&payload, "ProvisionedThroughput.WriteCapacityUnits"), None);
//! ```

#![warn(missing_docs)]

mod attributes;
mod path;
mod traits;
mod value;

pub use self::attributes::*;
pub use self::path::*;
pub use self::traits::*;
pub use self::value::*;
