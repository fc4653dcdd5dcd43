use clap::{Args, Parser, Subcommand};
use jobboard_core::{CompanyRole, Location};
use std::path::PathBuf;

/// Job board listing entry, view and export.
#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(version)]
#[command(about = "Submit, list and export job listings", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// URL of the remote JSON document (overrides config and environment)
    #[arg(short = 'u', long = "store-url", global = true, conflicts_with = "db")]
    pub store_url: Option<String>,

    /// Local SQLite listing database (overrides config and environment)
    #[arg(long = "db", global = true)]
    pub db: Option<PathBuf>,

    /// HTTP timeout in seconds for the remote store
    #[arg(long = "timeout-secs", global = true)]
    pub timeout_secs: Option<u64>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long = "log-dir", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit one listing
    Submit(SubmitArgs),
    /// Print every stored listing
    List,
    /// Write the listings as an .xlsx workbook
    Export {
        /// Output file (defaults to the configured file name in the current directory)
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
    },
    /// Check core linkage
    Ping,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long = "company")]
    pub company_name: String,

    #[arg(long = "phone")]
    pub phone_number: String,

    /// Coimbatore, Hyderabad, Bengaluru or Chennai
    #[arg(long = "location", default_value = "Coimbatore")]
    pub location: Location,

    /// Freelance, "Product Based" or "Service Based"
    #[arg(long = "role", default_value = "Freelance")]
    pub role: CompanyRole,

    #[arg(long = "cyber-security")]
    pub cyber_security: bool,

    #[arg(long = "python-backend")]
    pub python_backend: bool,

    #[arg(long = "net-backend")]
    pub net_backend: bool,

    #[arg(long = "ai-developer")]
    pub ai_developer: bool,
}
