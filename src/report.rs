use crate::icon::IconMode;

/// Result of processing one icon file.
#[derive(Debug)]
pub enum Outcome {
    Fixed {
        mode: IconMode,
        /// Source had 16-bit samples and was written back at 8 bits.
        reduced_depth: bool,
    },
    Skipped,
    Error(anyhow::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub fixed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RunReport {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Fixed { .. } => self.fixed += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Error(_) => self.errors += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Fixed {} icons, skipped {} icons",
            self.fixed, self.skipped
        )
    }
}
