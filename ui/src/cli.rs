//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FaceFinder - photo collections and face search from the terminal
#[derive(Parser, Debug)]
#[command(name = "facefinder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirmation: String,
    },

    /// End the current session
    Logout,

    /// Show the current session
    Status,

    /// Manage photo collections
    Collections {
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// Manage face searches
    Searches {
        #[command(subcommand)]
        action: SearchAction,
    },

    /// Validate a JSON record against a JSON schema of rule expressions
    Validate {
        /// Schema as JSON text, or @path to read it from a file
        #[arg(long)]
        schema: String,
        /// Record as JSON text, or @path to read it from a file
        #[arg(long)]
        record: String,
    },

    /// List the route table and its conflicts
    Routes,

    /// Resolve a path against the route table
    Route { path: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ResourceAction {
    /// List every record
    List,
    /// Show one record
    Show { id: i64 },
    /// Delete one record
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CollectionAction {
    #[command(flatten)]
    Record(ResourceAction),

    /// Create an empty collection
    Create {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SearchAction {
    #[command(flatten)]
    Record(ResourceAction),

    /// Start a face search for the faces in a photo
    Create {
        #[arg(long)]
        name: String,
        /// Photo with the faces to look for
        #[arg(long)]
        photo: PathBuf,
        /// Similarity threshold, in percent
        #[arg(long, value_parser = clap::value_parser!(i64).range(0..=100))]
        tolerance: i64,
        /// Collection to search in; repeat for several
        #[arg(long = "collection", required = true)]
        collections: Vec<i64>,
    },
}
