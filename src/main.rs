use anyhow::Result;
use clap::Parser;
use opacify::cli::Cli;
use opacify::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    commands::fix::run(&cli)
}
