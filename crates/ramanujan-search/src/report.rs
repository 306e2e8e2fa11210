//! The confirmed-match report.
//!
//! Each match is written as an `LHS:` line and an `RHS:` line followed by a
//! blank line. A match whose RHS line was already written is skipped, since
//! the same expansion often matches several equivalent closed forms.

use ramanujan_store::MatchRecord;
use rustc_hash::FxHashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::render::describe;
use crate::SearchError;

/// One rendered match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    /// The closed-form side.
    pub lhs: String,
    /// The expansion side.
    pub rhs: String,
    /// Precision the match was confirmed at.
    pub precision: usize,
}

/// A rendered set of matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Entries in input order, without repeated RHS lines.
    pub entries: Vec<ReportEntry>,
    /// Matches skipped because their RHS line repeated an earlier one.
    pub duplicates: usize,
}

impl Report {
    /// Renders `matches`.
    #[must_use]
    pub fn build(matches: &[MatchRecord]) -> Self {
        let mut seen = FxHashSet::default();
        let mut report = Self::default();
        for m in matches {
            let rhs = describe(&m.rhs);
            if !seen.insert(rhs.clone()) {
                report.duplicates += 1;
                continue;
            }
            report.entries.push(ReportEntry {
                lhs: describe(&m.lhs),
                rhs,
                precision: m.precision.digits(),
            });
        }
        report
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there is nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The report text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let _ = write!(out, "{}\n{}\n\n", entry.lhs, entry.rhs);
        }
        out
    }

    /// Writes the report to the first unused `search-<i>.result.txt` in
    /// `dir` and returns its path.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if the file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, SearchError> {
        let path = next_report_path(dir);
        std::fs::write(&path, self.render())?;
        info!(
            path = %path.display(),
            matches = self.len(),
            duplicates = self.duplicates,
            "wrote match report"
        );
        Ok(path)
    }
}

/// The first `search-<i>.result.txt` in `dir` that does not exist yet.
#[must_use]
pub fn next_report_path(dir: &Path) -> PathBuf {
    (0u64..)
        .map(|i| dir.join(format!("search-{i}.result.txt")))
        .find(|path| !path.exists())
        .unwrap_or_else(|| dir.join("search.result.txt"))
}
