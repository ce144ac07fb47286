//! CLI commands and argument parsing

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infer the schema of MongoDB collections
#[derive(Parser, Debug)]
#[command(name = "mongo-schemist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); command line values take precedence
    #[arg(short = 'f', long = "file", global = true)]
    pub config: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(short, long, global = true)]
    pub uri: Option<String>,

    /// Database name
    #[arg(short, long, global = true)]
    pub db: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze collections and print their schema
    Analyze {
        /// Collections to analyze (repeatable, empty = all user collections)
        #[arg(short, long = "collection")]
        collections: Vec<String>,

        /// Deepest level whose values are expanded into child fields
        #[arg(long)]
        max_depth: Option<usize>,

        /// Analyze a JSON file (array of Extended JSON documents) instead of MongoDB
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List the user collections of a database
    Collections,

    /// Test the connection to MongoDB
    Check,
}
