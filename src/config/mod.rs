pub mod toml_config;

pub use toml_config::HarnessConfig;

#[cfg(feature = "cli")]
use crate::core::page::PageFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "advent-mount")]
#[command(about = "Mount puzzle solvers onto a page with their part inputs")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "advent.toml")]
    pub config: String,

    /// Only mount these days (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub day: Vec<String>,

    /// Override the page format from config
    #[arg(long, value_enum)]
    pub format: Option<PageFormat>,

    /// Override the page output path from config (default: stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    pub monitor: Option<bool>,

    /// Show the mounts that would be made without fetching anything
    #[arg(long)]
    pub dry_run: bool,

    /// List registered applications and exit
    #[arg(long)]
    pub list_applications: bool,
}
