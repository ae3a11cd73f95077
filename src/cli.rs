//! CLI argument parsing for ossec-qpack

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ossec-qpack")]
#[command(version)]
#[command(
    about = "Generate an osquery query pack from the OSSEC rootkit file database",
    long_about = None
)]
pub struct Cli {
    /// OSSEC rootkit database (src/rootcheck/db/rootkit_files.txt in ossec-hids)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        default_value = "rootkit_files.txt"
    )]
    pub input: PathBuf,

    /// Query pack to write (overwritten if it exists)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "ossec-rootkit.conf"
    )]
    pub output: PathBuf,

    /// Query schedule interval in seconds
    #[arg(
        long = "interval",
        value_name = "SECONDS",
        default_value = "3600",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub interval: u32,

    /// Enable debug tracing output on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
