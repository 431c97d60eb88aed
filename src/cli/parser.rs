use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for sitesheet
/// Printable timesheet reports from SQLite or a JSON snapshot
#[derive(Parser)]
#[command(
    name = "sitesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build paginated PDF timesheet reports with equipment, materials and slip photos",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the directory slip photos are read from
    #[arg(global = true, long = "blobs", value_name = "DIR")]
    pub blobs: Option<String>,

    /// Read timesheets from a JSON snapshot instead of the database
    #[arg(global = true, long = "snapshot", value_name = "FILE")]
    pub snapshot: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Date and content filters shared by the report commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long = "from", value_name = "YYYY-MM-DD", help = "First work date to include")]
    pub from: Option<String>,

    #[arg(long = "to", value_name = "YYYY-MM-DD", help = "Last work date to include")]
    pub to: Option<String>,

    #[arg(
        long,
        value_name = "RANGE",
        conflicts_with_all = ["from", "to"],
        help = "Filter by year/month/day or a custom range (e.g. 2025-06 or 2025-06-01:2025-06-15)"
    )]
    pub range: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the database schema
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

    /// Build the multi-day batch report
    Batch {
        #[command(flatten)]
        dates: FilterArgs,

        #[arg(long, help = "Only this employee (default: All)")]
        employee: Option<String>,

        #[arg(long = "job-type", help = "Only this job type (default: All)")]
        job_type: Option<String>,

        #[arg(long, help = "Case-insensitive search in the job description")]
        search: Option<String>,

        #[arg(long, value_name = "PATH", help = "Output file or directory (default: current directory)")]
        out: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Build the report of a single timesheet entry
    Entry {
        /// Timesheet entry id
        id: String,

        #[arg(long, value_name = "PATH", help = "Output file or directory (default: current directory)")]
        out: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Export payroll hours per employee and pay week as CSV
    Payroll {
        #[command(flatten)]
        dates: FilterArgs,

        #[arg(long, value_name = "PATH", help = "Output file or directory (default: current directory)")]
        out: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,
    },
}
