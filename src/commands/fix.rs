use anyhow::Result;
use colored::Colorize;

use crate::cli::Cli;
use crate::config::{resolve_icon_dir, Config};
use crate::opacify::process_directory;
use crate::report::Outcome;

pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let dir = resolve_icon_dir(cli.directory.as_deref(), &config, &cli.config);
    log::info!("Scanning {}", dir.display());

    let report = process_directory(&dir, cli.dry_run, |name, outcome| {
        print_outcome(name, outcome, cli.dry_run)
    })?;

    println!("\n{} {}", "✓".green(), report.summary());
    if report.errors > 0 {
        println!(
            "{} {} icon(s) could not be processed",
            "!".yellow(),
            report.errors
        );
    }
    if cli.dry_run {
        println!("\n{} Dry run, no files written.", "ℹ".blue());
    }

    Ok(())
}

fn print_outcome(name: &str, outcome: &Outcome, dry_run: bool) {
    println!("{}", outcome_line(name, outcome, dry_run));
}

fn outcome_line(name: &str, outcome: &Outcome, dry_run: bool) -> String {
    match outcome {
        Outcome::Fixed {
            mode,
            reduced_depth,
        } => {
            let verb = if dry_run { "Would fix" } else { "Fixed" };
            let depth_note = if *reduced_depth {
                ", reduced to 8-bit"
            } else {
                ""
            };
            format!(
                "Processing: {}... {} {}",
                name,
                verb.green(),
                format!("({mode}{depth_note})").as_str().dimmed()
            )
        }
        Outcome::Skipped => format!(
            "Processing: {}... {}",
            name,
            "Skipped (already opaque)".dimmed()
        ),
        Outcome::Error(err) => format!(
            "Processing: {}... {} {} {:#}",
            name,
            "✗".red(),
            "Error:".red(),
            err
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconMode;

    #[test]
    fn error_line_names_file_and_cause() {
        colored::control::set_override(false);
        let err = anyhow::anyhow!("bad chunk").context("Failed to decode broken.png");

        let line = outcome_line("broken.png", &Outcome::Error(err), false);

        assert_eq!(
            line,
            "Processing: broken.png... ✗ Error: Failed to decode broken.png: bad chunk"
        );
    }

    #[test]
    fn dry_run_line_says_would_fix() {
        colored::control::set_override(false);
        let outcome = Outcome::Fixed {
            mode: IconMode::AlphaChannel,
            reduced_depth: true,
        };

        let line = outcome_line("a.png", &outcome, true);

        assert_eq!(
            line,
            "Processing: a.png... Would fix (alpha channel, reduced to 8-bit)"
        );
    }

    #[test]
    fn skipped_line() {
        colored::control::set_override(false);
        assert_eq!(
            outcome_line("b.png", &Outcome::Skipped, false),
            "Processing: b.png... Skipped (already opaque)"
        );
    }
}
