//! CLI module
//!
//! Command-line interface for analyzing collections.
//!
//! # Commands
//!
//! - `analyze` - Print the schema of one or more collections
//! - `collections` - List the user collections of a database
//! - `check` - Test the connection to MongoDB

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
