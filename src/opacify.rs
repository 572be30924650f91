use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::icon;
use crate::report::{Outcome, RunReport};

pub const ICON_SUFFIX: &str = ".png";

/// Flattens every `.png` directly inside `dir`, calling `on_outcome` after each file.
///
/// Fails before touching anything if `dir` is missing. Per-file failures are
/// handed to `on_outcome` as [`Outcome::Error`] and the scan carries on.
pub fn process_directory<F>(dir: &Path, dry_run: bool, mut on_outcome: F) -> Result<RunReport>
where
    F: FnMut(&str, &Outcome),
{
    if !dir.is_dir() {
        bail!("Icon directory not found: {}", dir.display());
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .collect();
    entries.sort_by_key(|entry| entry.as_ref().ok().map(|e| e.file_name()));

    let mut report = RunReport::default();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let outcome =
                    Outcome::Error(anyhow!(err).context("Failed to read directory entry"));
                report.record(&outcome);
                on_outcome("?", &outcome);
                continue;
            }
        };

        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if !name.ends_with(ICON_SUFFIX) {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            log::debug!("Skipping non-file entry {}", path.display());
            continue;
        }

        let outcome = icon::fix_icon(&path, dry_run).unwrap_or_else(Outcome::Error);
        report.record(&outcome);
        on_outcome(&name, &outcome);
    }

    Ok(report)
}
