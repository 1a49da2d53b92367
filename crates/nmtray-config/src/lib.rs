//! # nm-tray config
//!
//! Type-safe settings for locating and loading translation catalogs.
//!
//! Settings come from a YAML or TOML file, are overridden by `NMTRAY_*`
//! environment variables and are validated before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
