//! CLI command definitions using clap.
//!
//! - run: start the scheduler in the foreground
//! - check: run one check cycle now
//! - config: print the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// moocnotify - emails reminders for MOOC homework nearing its deadline
#[derive(Parser, Debug)]
#[command(name = "moocnotify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log to stderr instead of the log file
    #[arg(long, global = true)]
    pub log_stderr: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the scheduler in the foreground until Ctrl-C
    Run,

    /// Run one homework check now
    Check {
        /// Print the reminders instead of sending email
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// With --dry-run, print reminders as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,
    },

    /// Print the effective configuration (secrets masked)
    Config,
}
