use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rworklog
#[derive(Parser)]
#[command(
    name = "rworklog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Work/rest interval tracker: asks what you did at every boundary and keeps a per-day log",
    long_about = None
)]
pub struct Cli {
    /// Override the directory holding the day files
    #[arg(global = true, long = "dir", value_name = "PATH")]
    pub dir: Option<String>,

    /// Run in test mode (no config file update, logs on stderr)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start tracking today: work and rest intervals until you end the session
    Start {
        /// Work interval in minutes (1-120, default from config)
        #[arg(long, short = 'w')]
        work: Option<u32>,

        /// Rest interval in minutes (1-60, default from config)
        #[arg(long, short = 'r')]
        rest: Option<u32>,
    },

    /// Show the records of a day
    List {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Change the text of a record
    Edit {
        /// Record number as shown by `list`
        number: usize,

        /// New description (or pause reason)
        text: String,

        /// Day of the record (YYYY-MM-DD, default today)
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Delete a record
    Del {
        /// Record number as shown by `list`
        number: usize,

        /// Day of the record (YYYY-MM-DD, default today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export a day's records
    Export {
        /// Export format
        #[arg(long, value_enum, value_name = "FORMAT", default_value = "csv")]
        format: ExportFormat,

        /// Output file path
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Day to export (YYYY-MM-DD, default today)
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view, create or edit)
    Config {
        /// Print the effective configuration
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        /// Write the configuration file with the current values
        #[arg(long = "init", help = "Create the configuration file")]
        init_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(long = "editor", help = "Specify the editor to use")]
        editor: Option<String>,
    },
}
