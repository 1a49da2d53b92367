//! # nm-tray l10n
//!
//! Command line tool for nm-tray translation catalogs.
//!
//! The binary wires configuration, logging and the subcommands together;
//! this library holds the pieces so they can be driven from tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use commands::run;
pub use error::{L10nError, L10nResult};
