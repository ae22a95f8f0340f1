//! Configuration for spantag.
//!
//! The configuration is loaded from a directory. All files are optional:
//!
//!  - `config.yml` contains general settings, such as [logging](spantag_log::LogConfig).
//!  - `decorators.yml` or `decorators.json` contains the
//!    [decoration rules](spantag_decorators::DecoratorsConfig). Without this file, the built-in
//!    rules are used.
//!
//! Settings can be overridden after loading with [`Config::apply_override`], which is how command
//! line arguments and environment variables take effect.

#![warn(missing_docs)]

mod config;

pub use self::config::*;
