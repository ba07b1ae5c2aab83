use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for crewtime
/// CLI application to verify crew schedules and record worked hours with SQLite
#[derive(Parser)]
#[command(
    name = "crewtime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Crew time tracking: verify scheduled hours, correct them and categorize worked time",
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

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage crews
    Crew {
        #[command(subcommand)]
        action: CrewAction,
    },

    /// Manage crew members
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Show the crew's scheduled hours for a date
    Schedule {
        /// Date (YYYY-MM-DD, today, yesterday)
        date: String,

        #[arg(long, help = "Crew id or name (default: crew of the logged-in member)")]
        crew: Option<String>,
    },

    /// Everyone worked their scheduled hours: record them
    Confirm {
        /// Date (YYYY-MM-DD, today, yesterday)
        date: String,

        #[arg(long, help = "Crew id or name (default: crew of the logged-in member)")]
        crew: Option<String>,

        #[arg(long, help = "Free-text comments stored on every entry")]
        comments: Option<String>,

        #[arg(long, help = "Work site stored on every entry")]
        location: Option<String>,

        #[arg(long, help = "Submit the entries right away")]
        submit: bool,
    },

    /// Hours differ from the schedule: correct them for the group or per member
    Correct {
        /// Date (YYYY-MM-DD, today, yesterday)
        date: String,

        #[arg(long, help = "Crew id or name (default: crew of the logged-in member)")]
        crew: Option<String>,

        #[arg(
            long = "in",
            requires = "end",
            conflicts_with = "members",
            help = "Group start time (HH:MM)"
        )]
        start: Option<String>,

        #[arg(long = "out", requires = "start", help = "Group end time (HH:MM)")]
        end: Option<String>,

        #[arg(
            long = "member",
            value_name = "ID=START-END",
            help = "Individual correction, e.g. 3=08:30-16:00 (repeatable)"
        )]
        members: Vec<String>,

        #[arg(long, help = "Free-text comments stored on every entry")]
        comments: Option<String>,

        #[arg(long, help = "Work site stored on every entry")]
        location: Option<String>,

        #[arg(long, help = "Submit the entries right away")]
        submit: bool,
    },

    /// Categorize recorded hours into working / traveling / standby
    Breakdown {
        /// Date (YYYY-MM-DD, today, yesterday)
        date: String,

        #[arg(long, help = "Crew id or name (default: crew of the logged-in member)")]
        crew: Option<String>,

        #[arg(
            long,
            conflicts_with = "group",
            help = "Categorize only this member's entry"
        )]
        member: Option<i64>,

        #[arg(
            long,
            help = "Apply the same breakdown to every member of the crew (default without --member)"
        )]
        group: bool,

        #[arg(long, value_name = "HOURS", help = "Working hours (e.g. 6.5)")]
        working: Option<String>,

        #[arg(long, value_name = "HOURS", help = "Traveling hours")]
        traveling: Option<String>,

        #[arg(long, value_name = "HOURS", help = "Standby hours")]
        standby: Option<String>,

        #[arg(
            long = "item",
            value_name = "CATEGORY=HOURS|START-END[,DESCRIPTION]",
            help = "Extra item, e.g. setup=0.5 or traveling=07:30-08:00,Drive to site (repeatable)"
        )]
        items: Vec<String>,

        #[arg(long, help = "Free-text comments stored on the entries")]
        comments: Option<String>,
    },

    /// Submit the crew's draft entries for a date
    Submit {
        /// Date (YYYY-MM-DD, today, yesterday)
        date: String,

        #[arg(long, help = "Crew id or name (default: crew of the logged-in member)")]
        crew: Option<String>,

        #[arg(long, help = "Submitter name (default: logged-in member)")]
        by: Option<String>,
    },

    /// Change the review status of entries (approved, rejected, submitted)
    Status {
        /// Date (YYYY-MM-DD, today, yesterday)
        date: String,

        #[arg(long, help = "Crew id or name (default: crew of the logged-in member)")]
        crew: Option<String>,

        #[arg(long, help = "Only this member's entry")]
        member: Option<i64>,

        #[arg(long = "set", value_name = "STATUS")]
        status: String,

        #[arg(long, help = "Who performs the change (default: logged-in member)")]
        by: Option<String>,
    },

    /// List recorded time entries
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day, a custom range or 'all' (default: current month)"
        )]
        period: Option<String>,

        #[arg(long, help = "Crew id or name")]
        crew: Option<String>,

        #[arg(long, help = "Member id")]
        member: Option<i64>,

        #[arg(long = "details", help = "Show the hours breakdown of every entry")]
        details: bool,
    },

    /// Delete recorded entries for a date
    Del {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long, help = "Crew id or name (default: crew of the logged-in member)")]
        crew: Option<String>,

        #[arg(long, help = "Only this member's entry")]
        member: Option<i64>,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
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

    /// Export time entries
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

        #[arg(long, help = "Crew id or name")]
        crew: Option<String>,

        #[arg(long, help = "Member id")]
        member: Option<i64>,

        #[arg(long, short = 'b', help = "Export one row per breakdown item")]
        breakdown: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum CrewAction {
    /// Create a crew
    Add {
        name: String,
    },

    /// List crews
    List,
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member to a crew
    Add {
        name: String,

        #[arg(long, help = "Crew id or name")]
        crew: String,

        #[arg(long)]
        role: Option<String>,

        #[arg(long = "rate", help = "Hourly rate")]
        hourly_rate: Option<f64>,

        #[arg(
            long,
            value_name = "START-END",
            help = "Scheduled shift, e.g. 08:30-16:30 (default from configuration)"
        )]
        shift: Option<String>,
    },

    /// List members
    List {
        #[arg(long, help = "Crew id or name")]
        crew: Option<String>,

        #[arg(long, help = "Include inactive members")]
        all: bool,
    },

    /// Mark a member as inactive
    Deactivate {
        id: i64,
    },

    /// Set or reset a member's scheduled shift
    Schedule {
        id: i64,

        #[arg(long, value_name = "START-END", conflicts_with = "reset")]
        shift: Option<String>,

        #[arg(long, help = "Use the configured default shift")]
        reset: bool,
    },
}
