//! # nm-tray common
//!
//! Shared functionality for the nm-tray localization workspace.
//!
//! This crate provides the structured logging setup used by the command line
//! tool and, behind the `testing` feature, the Qt Linguist fixtures shared by
//! the integration tests of every other crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_logging, LoggingConfig, LoggingError};
