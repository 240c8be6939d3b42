// src/cli/args.rs
use crate::domain::TagFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// API bearer token
    #[arg(long, env = "NOTEHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Base URL of the notes service (overrides the config file)
    #[arg(long, value_name = "URL", env = "NOTEHUB_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List one page of notes
    List {
        /// Search term matched against title and content
        #[arg(short, long, default_value = "")]
        search: String,

        /// Tag filter: All, Todo, Work, Personal, Meeting or Shopping
        #[arg(short, long, default_value = "All")]
        tag: TagFilter,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Output the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// View a note in the browser
    View {
        /// Note ID to view
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Output note as JSON instead of opening in browser
        #[arg(long)]
        json: bool,
    },

    /// Create a note
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        /// One of Todo, Work, Personal, Meeting, Shopping
        #[arg(long, default_value = "Todo")]
        tag: String,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Interactive list view with live search
    Browse {
        /// Tag path segment to start from
        #[arg(value_name = "TAG", default_value = "All")]
        tag: TagFilter,
    },

    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
