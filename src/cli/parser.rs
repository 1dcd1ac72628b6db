use crate::export::ExportFormat;
use crate::models::{OwnerRef, OwnerType};
use clap::{ArgGroup, Args, Parser, Subcommand};

/// Command-line interface definition for holical
/// Franchise holiday calendars with per-store overrides, stored in SQLite
#[derive(Parser)]
#[command(
    name = "holical",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve and edit franchise holiday calendars (legal, head office, franchise, store) using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Calendar owner selection; no flag means the legal calendar.
#[derive(Args, Clone, Debug, Default)]
#[command(group(ArgGroup::new("owner").multiple(false)))]
pub struct OwnerArgs {
    #[arg(long = "head-office", value_name = "ID", group = "owner")]
    pub head_office: Option<i64>,

    #[arg(long = "franchise", value_name = "ID", group = "owner")]
    pub franchise: Option<i64>,

    #[arg(long = "store", value_name = "ID", group = "owner")]
    pub store: Option<i64>,
}

impl OwnerArgs {
    pub fn target(&self) -> OwnerRef {
        match (self.head_office, self.franchise, self.store) {
            (_, _, Some(id)) => OwnerRef::store(id),
            (_, Some(id), _) => OwnerRef::franchise(id),
            (Some(id), _, _) => OwnerRef::head_office(id),
            _ => OwnerRef::legal(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
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

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", value_name = "OPERATION", help = "Only rows of one operation (save, del, org, ...)")]
        operation: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing backup without asking")]
        force: bool,
    },

    /// Register head offices, franchises and stores
    Org {
        #[command(subcommand)]
        action: OrgCommand,
    },

    /// Show the effective holiday calendar of an owner for one year
    Resolve {
        #[arg(long)]
        year: i32,

        #[command(flatten)]
        owner: OwnerArgs,

        #[arg(long = "own-only", help = "Hide inherited holidays")]
        own_only: bool,

        #[arg(long, help = "Print the resolved calendar as JSON")]
        json: bool,
    },

    /// Create, save or delete holidays
    Holiday {
        #[command(subcommand)]
        action: HolidayCommand,
    },

    /// Set or clear a store's operating override for an inherited holiday
    #[command(group(ArgGroup::new("mode").required(true).multiple(false)))]
    Override {
        #[arg(long, value_name = "ID")]
        store: i64,

        #[arg(long, value_name = "ID")]
        holiday: i64,

        #[arg(long, group = "mode", help = "Store stays open on this holiday")]
        open: bool,

        #[arg(long, group = "mode", help = "Store closes on this holiday")]
        closed: bool,

        #[arg(long, group = "mode", help = "Follow the inherited setting again")]
        clear: bool,
    },

    /// Tell whether an owner operates on a given date
    Status {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: String,

        #[command(flatten)]
        owner: OwnerArgs,
    },

    /// Export a resolved calendar
    Export {
        #[arg(long)]
        year: i32,

        #[command(flatten)]
        owner: OwnerArgs,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum OrgCommand {
    /// Add a head office
    HeadOffice { name: String },

    /// Add a franchise under a head office
    Franchise {
        #[arg(long = "head-office", value_name = "ID")]
        head_office: i64,

        name: String,
    },

    /// Add a store, directly under a head office or under one of its franchises
    Store {
        #[arg(long = "head-office", value_name = "ID")]
        head_office: i64,

        #[arg(long, value_name = "ID")]
        franchise: Option<i64>,

        name: String,
    },

    /// Print the organization tree
    List,
}

#[derive(Subcommand)]
pub enum HolidayCommand {
    /// Add one holiday to an owner's calendar
    Add {
        #[arg(long)]
        year: i32,

        #[arg(long = "owner-type", value_enum)]
        owner_type: OwnerType,

        #[arg(long = "owner-id", value_name = "ID", help = "Not needed for legal holidays")]
        owner_id: Option<i64>,

        #[arg(long)]
        name: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: String,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Last day, for multi-day holidays")]
        end: Option<String>,

        #[arg(long, help = "Stores stay open on this holiday")]
        operating: bool,

        #[arg(
            long,
            value_name = "TYPES",
            help = "Comma-separated: head-office, all-head-office-stores, all-franchise-stores"
        )]
        apply: Option<String>,
    },

    /// Save a full owner/year bundle from a JSON file
    Save {
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Delete one holiday
    Del {
        #[arg(long = "owner-type", value_enum)]
        owner_type: OwnerType,

        #[arg(long)]
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
