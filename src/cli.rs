use crate::store::ViewMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coin-collection")]
#[command(about = "US coin collection checklist tracker", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (default: from config)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available collection types and their options
    Types,

    /// Create a collection
    Create {
        /// Collection name
        #[arg(required = true)]
        name: String,

        /// Collection type, e.g. "Nickels"
        #[arg(short = 't', long = "type", required = true)]
        series_type: String,

        /// First year (default: series start)
        #[arg(long)]
        start: Option<i32>,

        /// Last year (default: series end)
        #[arg(long)]
        stop: Option<i32>,

        /// Split slots by mint mark
        #[arg(long, conflicts_with = "no_mint_marks")]
        mint_marks: bool,

        /// One slot per year
        #[arg(long)]
        no_mint_marks: bool,

        /// Turn an option on by label (repeatable)
        #[arg(long = "on", value_name = "LABEL")]
        enable: Vec<String>,

        /// Turn an option off by label (repeatable)
        #[arg(long = "off", value_name = "LABEL")]
        disable: Vec<String>,
    },

    /// List collections
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the slots of a collection
    Show {
        #[arg(required = true)]
        name: String,

        /// Only slots not yet collected
        #[arg(long)]
        missing: bool,
    },

    /// Flip the collected flag of a slot
    Toggle {
        #[arg(required = true)]
        name: String,

        #[arg(required = true)]
        identifier: String,

        /// Mint mark or variant (empty for none)
        #[arg(default_value = "")]
        mint: String,
    },

    /// Change grade, quantity, notes or collected state of a slot
    Update {
        #[arg(required = true)]
        name: String,

        #[arg(required = true)]
        identifier: String,

        #[arg(default_value = "")]
        mint: String,

        #[arg(long)]
        collected: Option<bool>,

        #[arg(long)]
        grade: Option<u32>,

        #[arg(long)]
        quantity: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Rename a collection
    Rename {
        #[arg(required = true)]
        old_name: String,

        #[arg(required = true)]
        new_name: String,
    },

    /// Delete a collection
    Delete {
        #[arg(required = true)]
        name: String,
    },

    /// Move collections to the top of the list, in the given order
    Reorder {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Set the view mode of a collection
    View {
        #[arg(required = true)]
        name: String,

        #[arg(value_enum)]
        mode: ViewMode,
    },

    /// Export every collection to a backup directory
    Export {
        /// Backup directory (default: from config)
        dir: Option<PathBuf>,
    },

    /// Replace every collection with a backup
    Import {
        /// Backup directory (default: from config)
        dir: Option<PathBuf>,
    },

    /// Show or change settings
    Config {
        /// Database file
        #[arg(long)]
        set_db: Option<PathBuf>,

        /// Backup directory
        #[arg(long)]
        set_backup_dir: Option<PathBuf>,

        /// Year used for series still in production
        #[arg(long)]
        set_year: Option<i32>,

        /// Show current settings
        #[arg(long)]
        show: bool,
    },
}
