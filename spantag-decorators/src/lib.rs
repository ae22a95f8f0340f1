//! Match-and-rewrite rules over span attributes.
//!
//! A [`DecorationRule`] refines the attributes of a span after they have been extracted. Each rule
//! matches on the presence, and optionally the value, of a single tag. When it matches, it writes
//! a target tag with either a configured value or a value computed by its [`DecoratorKind`].
//!
//! Rules are applied in order by a [`DecorationEngine`]. The engine is created from a
//! [`DecoratorsConfig`], or uses the [built-in rules](builtin_rules) when no configuration exists.
//! Invalid configuration entries are skipped with a warning.
//!
//! # Example
//!
//! ```
//! use spantag_decorators::DecorationEngine;
//! use spantag_protocol::Attributes;
//!
//! let mut attributes = Attributes::from_iter([
//!     ("component", "okhttp"),
//!     ("http.method", "get"),
//!     ("http.url", "https://api.example.com/v1/users/42?expand=1"),
//! ]);
//!
//! DecorationEngine::builtin().apply(&mut attributes);
//!
//! assert_eq!(attributes.get_str("span.type"), Some("http"));
//! assert_eq!(attributes.get_str("operation.name"), Some("okhttp.http"));
//! assert_eq!(attributes.get_str("resource.name"), Some("GET /v1/users/?"));
//! ```

#![warn(missing_docs)]

mod config;
mod defaults;
mod engine;
mod error;
mod kind;
mod registry;
mod resource;
mod rule;
pub mod tags;

pub use self::config::*;
pub use self::defaults::*;
pub use self::engine::*;
pub use self::error::*;
pub use self::kind::*;
pub use self::registry::*;
pub use self::resource::normalize_url_path;
pub use self::rule::*;
