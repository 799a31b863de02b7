use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "callguard",
    version,
    about = "Offline risk audit of queued contract calls against an ABI"
)]
pub struct Args {
    /// Path to the interface description (JSON ABI or build artifact)
    pub abi_path: PathBuf,

    /// Path to the queued calls (JSON array of {to, data, value?})
    pub queue_path: PathBuf,

    /// Output format
    #[arg(long, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Replace the built-in rule table with rules from a JSON file
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Exit with status 2 when any call's risk exceeds this value
    #[arg(long, value_name = "RISK")]
    pub fail_above: Option<u32>,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
