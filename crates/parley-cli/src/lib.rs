//! Parley CLI library.
//!
//! Argument parsing and command handlers behind the `parley` binary.

pub mod cli;
pub mod commands;
pub mod error;

pub use error::{CliError, Result};
