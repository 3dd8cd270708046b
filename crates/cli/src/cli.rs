use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manage orbital-element sources for satreg.
///
/// Sources are either built-in catalog groups or user-added URLs and pasted
/// text. Enabled sources are merged by the tracker into one object set.
#[derive(Parser, Debug)]
#[command(name = "satreg", version, about = "Manage orbital-element data sources")]
pub struct CliArgs {
    /// Data directory holding the registry (overrides SATREG_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all sources with enablement and status
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print enabled source ids, one per line
    Enabled,

    /// Enable a disabled source or disable an enabled one
    Toggle {
        /// Source id, e.g. celestrak:stations
        id: String,
    },

    /// Add a source fetched from a URL
    AddUrl {
        /// Display name
        name: String,
        /// URL returning element sets
        url: String,
    },

    /// Add a source from pasted element text
    AddText {
        /// Display name
        name: String,
        /// Read text from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Remove a user-added source
    Remove {
        id: String,
    },

    /// Rename a user-added source
    Rename {
        id: String,
        name: String,
    },

    /// Print the stored text of a pasted-text source
    Text {
        id: String,
    },
}
