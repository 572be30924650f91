use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(
    name = "opacify",
    about = "Flatten transparent PNG icons onto an opaque white background"
)]
pub struct Cli {
    /// Icon directory (overrides the default icon folder location)
    #[arg(env = "OPACIFY_DIR")]
    pub directory: Option<PathBuf>,

    /// Path to config file
    #[arg(long, default_value = "opacify.toml")]
    pub config: PathBuf,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
