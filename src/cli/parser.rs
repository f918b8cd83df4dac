use crate::export::ExportFormat;
use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition for fleetlog
/// Daily trip reports and oil-change tracking for a vehicle fleet, on SQLite
#[derive(Parser)]
#[command(
    name = "fleetlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A fleet mileage ledger: daily trip reports, run distances and oil-change reminders using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Shared access password, when one is configured
    #[arg(
        global = true,
        long = "password",
        env = "FLEETLOG_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

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

    /// Check the access password
    Login,

    /// Manage vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleCmd,
    },

    /// Manage drivers
    Driver {
        #[command(subcommand)]
        action: DriverCmd,
    },

    /// Daily trip reports
    Report {
        #[command(subcommand)]
        action: ReportCmd,
    },

    /// Maintenance dashboard: remaining km to the next oil change
    Status {
        #[arg(long, value_name = "ID", help = "Show a single vehicle")]
        vehicle: Option<i64>,
    },

    /// Full JSON backup of vehicles, drivers and reports
    Data {
        #[command(subcommand)]
        action: DataCmd,
    },

    /// Export trip reports
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database file
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
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
}

#[derive(Subcommand)]
pub enum VehicleCmd {
    /// Register a vehicle
    Add {
        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_name = "KM", help = "Odometer at the last oil change")]
        baseline: Option<i64>,

        #[arg(
            long = "element-changed",
            help = "The oil filter element was replaced at the last oil change"
        )]
        element_changed: bool,
    },

    /// Edit a vehicle
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_name = "KM")]
        baseline: Option<i64>,

        #[arg(long = "element-changed", action = ArgAction::Set, value_name = "BOOL")]
        element_changed: Option<bool>,
    },

    /// Delete a vehicle (its reports are kept)
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List vehicles
    List,

    /// Record an oil change
    OilChange {
        id: i64,

        #[arg(
            long,
            value_name = "KM",
            help = "Odometer at the change (default: latest reported reading)"
        )]
        odometer: Option<i64>,
    },

    /// Rebuild the cached odometer from the report history
    Sync { id: Option<i64> },
}

#[derive(Subcommand)]
pub enum DriverCmd {
    /// Register a driver
    Add {
        #[arg(long)]
        name: Option<String>,
    },

    /// Rename a driver
    Edit {
        id: i64,

        #[arg(long)]
        name: String,
    },

    /// Delete a driver (reports are kept)
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List drivers
    List,
}

#[derive(Subcommand)]
pub enum ReportCmd {
    /// Add a daily report
    Add {
        #[arg(long, value_name = "ID|NAME")]
        vehicle: Option<String>,

        #[arg(long, value_name = "ID|NAME")]
        driver: Option<String>,

        #[arg(long, value_name = "KM", help = "Odometer reading at the end of the day")]
        odometer: Option<i64>,

        #[arg(
            long,
            value_name = "DATE",
            help = "YYYY-MM-DD, today, yesterday or +N/-N days (default: today)",
            allow_hyphen_values = true
        )]
        date: Option<String>,

        #[arg(long)]
        site: Option<String>,

        #[arg(long)]
        destination: Option<String>,

        #[arg(long, value_name = "TEXT", help = "Report a vehicle problem")]
        issue: Option<String>,
    },

    /// Edit a report
    Edit {
        id: i64,

        #[arg(long, value_name = "ID|NAME")]
        vehicle: Option<String>,

        #[arg(long, value_name = "ID|NAME")]
        driver: Option<String>,

        #[arg(long, value_name = "KM")]
        odometer: Option<i64>,

        #[arg(long, value_name = "DATE", allow_hyphen_values = true)]
        date: Option<String>,

        #[arg(long)]
        site: Option<String>,

        #[arg(long)]
        destination: Option<String>,

        #[arg(long, value_name = "TEXT")]
        issue: Option<String>,

        #[arg(long, conflicts_with = "issue", help = "Mark the vehicle as in good condition")]
        good: bool,
    },

    /// Delete a report
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List reports grouped by vehicle, newest first
    List {
        #[arg(long, value_name = "ID|NAME")]
        vehicle: Option<String>,

        #[arg(long, value_name = "ID|NAME")]
        driver: Option<String>,

        #[arg(long, value_name = "DATE", allow_hyphen_values = true)]
        date: Option<String>,

        #[arg(
            long,
            short,
            conflicts_with = "date",
            help = "Filter by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long = "oldest-first")]
        oldest_first: bool,
    },

    /// Site and destination names used so far
    Suggest {
        #[arg(long, conflicts_with = "destinations")]
        sites: bool,

        #[arg(long)]
        destinations: bool,
    },
}

#[derive(Subcommand)]
pub enum DataCmd {
    /// Write every vehicle, driver and report to a JSON file
    Export {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace the stored data with the content of a JSON backup
    Import {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
