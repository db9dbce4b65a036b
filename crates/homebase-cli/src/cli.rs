use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "homebase-record",
    version,
    about = "Set programs/series to record at homebase.no"
)]
pub struct Cli {
    /// Configuration file with credentials and series
    #[arg(short, long, default_value = "homebase.toml")]
    pub config: PathBuf,

    /// Be more verbose (same as --debug 1)
    #[arg(short, long)]
    pub verbose: bool,

    /// Debug level: 1 gives INFO, 2+ gives DEBUG
    #[arg(long, default_value_t = 0)]
    pub debug: u8,

    /// Number of days of programs to check
    #[arg(long)]
    pub days: Option<f64>,

    /// List the available channels and exit
    #[arg(long, conflicts_with = "list_programs")]
    pub list_channels: bool,

    /// List the available programs and exit
    #[arg(long)]
    pub list_programs: bool,

    /// Print listings as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.debug {
            2..=u8::MAX => "debug",
            1 => "info",
            0 if self.verbose => "info",
            _ => "warn",
        }
    }
}
