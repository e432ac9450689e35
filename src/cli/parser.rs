use crate::core::query::SortKey;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for servicelog
#[derive(Parser)]
#[command(
    name = "servicelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track community service hours: clock in/out, log entries and see your totals",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user instead of the configured one
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Clock in now; press Enter (optionally after typing notes) to clock out
    Clock {
        #[arg(long, help = "What you are doing")]
        title: String,

        #[arg(long = "org", help = "Organization you are serving")]
        organization: String,

        #[arg(long, help = "Category (default from configuration)")]
        category: Option<String>,
    },

    /// Log a completed session manually
    Add {
        #[arg(long)]
        title: String,

        #[arg(long = "org")]
        organization: String,

        #[arg(long = "desc")]
        description: String,

        /// Date of the session (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        #[arg(long = "start", help = "Start time (HH:MM, default 09:00)")]
        start: Option<String>,

        #[arg(long = "duration", help = "Duration: minutes or e.g. 1h30m (default 60)")]
        duration: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        supervisor: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Edit a logged session (id or unique id prefix)
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long = "org")]
        organization: Option<String>,

        #[arg(long = "desc")]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "start")]
        start: Option<String>,

        #[arg(long = "duration")]
        duration: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, help = "New notes (empty string clears)")]
        notes: Option<String>,

        #[arg(long, help = "New supervisor (empty string clears)")]
        supervisor: Option<String>,

        #[arg(long, help = "New location (empty string clears)")]
        location: Option<String>,
    },

    /// Delete a logged session (id or unique id prefix)
    Del {
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List logged sessions
    List {
        #[arg(long, short, help = "Search in title, organization and description")]
        search: Option<String>,

        #[arg(long, short, help = "Category filter, or 'all'")]
        category: Option<String>,

        #[arg(long, value_enum, default_value = "date")]
        sort: SortKey,
    },

    /// Show one session in detail
    Show { id: String },

    /// Show totals and recent sessions
    Stats {
        #[arg(long, help = "Print statistics as JSON")]
        json: bool,
    },

    /// Export logged sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, help = "Search in title, organization and description")]
        search: Option<String>,

        #[arg(long, short, help = "Category filter, or 'all'")]
        category: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
