use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notekeeper")]
#[command(version, about = "A small personal notes service and its client")]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, short = 'c', global = true, value_name = "FILE", env = "NOTEKEEPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the note store (client commands)
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the note store HTTP server
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:5000
        #[arg(long)]
        bind: Option<String>,

        /// SQLite database file
        #[arg(long, conflicts_with = "in_memory")]
        database: Option<PathBuf>,

        /// Keep notes in memory only; they are lost on exit
        #[arg(long)]
        in_memory: bool,

        /// Origin allowed to call the API from a browser or app runtime
        #[arg(long)]
        cors_origin: Option<String>,

        /// Emit logs as JSON lines
        #[arg(long)]
        log_json: bool,
    },

    /// List all notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note id
        id: i64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Add {
        /// Note title (at least 3 characters)
        title: String,

        /// Note description (at least 10 characters)
        description: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the title and description of a note
    Update {
        /// Note id
        id: i64,

        /// New title
        title: String,

        /// New description
        description: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note permanently
    Delete {
        /// Note id
        id: i64,
    },
}
