//! Classification of AWS SDK requests and extraction of span attributes from them.
//!
//! Every supported call is described by a [`RequestKind`]: the concrete request type name it
//! matches, its service [`Family`] and a list of [`FieldSpec`]s. A field spec names the attribute to
//! write and the [path](spantag_protocol::resolve) of the value in the request or response.
//!
//! Extraction runs in two steps:
//!
//!  1. [`classify`] maps a request to its kind. The concrete type name is tried first, then the
//!     declared parent type name, which matches the generic kind of a service family.
//!  2. [`extract`] resolves all field specs of that kind and renders the resolved values into
//!     [`Attributes`](spantag_protocol::Attributes).
//!
//! Requests and responses are accessed through [`Getter`](spantag_protocol::Getter), so both typed
//! SDK shapes and dynamic payloads ([`DynamicRequest`]) can be used.
//!
//! # Example
//!
//! ```
//! use spantag_aws::{extract, DynamicRequest};
//!
//! let request: DynamicRequest = serde_json::from_str(
//!     r#"{"type": "GetItemRequest", "fields": {"TableName": "users", "ConsistentRead": true}}"#,
//! )
//! .unwrap();
//!
//! let attributes = extract(&request, None);
//! assert_eq!(
//!     serde_json::to_string(&attributes).unwrap(),
//!     r#"{"aws.dynamodb.consistent_read":true}"#
//! );
//! ```

#![warn(missing_docs)]

mod classify;
mod extract;
mod field;
mod kind;
mod render;
mod request;
mod table;

pub use self::classify::*;
pub use self::extract::*;
pub use self::field::*;
pub use self::kind::*;
pub use self::request::*;
pub use self::table::*;
