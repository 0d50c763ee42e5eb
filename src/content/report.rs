//! Validation report types and formatting.
//!
//! The report only records outcomes. Whether a failed entry is skipped or
//! aborts the build is the caller's decision.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use owo_colors::OwoColorize;

use crate::error::EntryError;
use crate::utils::{plural_count, plural_s};

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedError {
    /// The field that failed, empty for entry-level failures.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Outcomes of validating many entries, grouped by entry.
#[derive(Debug, Default)]
pub struct ValidationReport {
    checked: usize,
    /// Errors keyed by `collection/id`.
    entries: BTreeMap<String, Vec<ReportedError>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of loading one entry.
    pub fn record<T>(&mut self, collection: &str, id: &str, result: &Result<T, EntryError>) {
        self.checked += 1;
        let Err(err) = result else {
            return;
        };

        let errors = match err.diagnostics() {
            Some(diag) => diag
                .errors()
                .iter()
                .map(|e| ReportedError {
                    target: e.field().unwrap_or_default().to_owned(),
                    reason: e.to_string(),
                })
                .collect(),
            None => vec![ReportedError {
                target: String::new(),
                reason: error_chain(err),
            }],
        };

        self.entries
            .entry(format!("{collection}/{id}"))
            .or_default()
            .extend(errors);
    }

    /// Number of entries recorded.
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Count of entries with errors.
    pub fn failed_count(&self) -> usize {
        self.entries.len()
    }

    /// Total error count.
    pub fn error_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_ok(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn errors_for(&self, key: &str) -> Option<&[ReportedError]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Print every failed entry to stderr.
    pub fn print(&self) {
        if self.entries.is_empty() {
            return;
        }
        eprintln!();
        eprintln!(
            "{} {}",
            "entries".red().bold(),
            format!(
                "({}, {})",
                plural_count(self.failed_count(), "file"),
                plural_count(self.error_count(), "error")
            )
            .dimmed()
        );

        for (key, errs) in &self.entries {
            eprintln!("{}{}{}", "[".dimmed(), key.cyan(), "]".dimmed());
            for e in errs {
                eprintln!("{} {}", "→".red(), e.reason);
            }
        }
    }
}

/// `err` followed by each of its sources, joined with `: `.
fn error_chain(err: &EntryError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();

        if total == 0 {
            write!(
                f,
                "{}",
                format!("all {} valid", plural_count(self.checked, "item")).green()
            )
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{} in {} of {}", plural_s(total), self.failed_count(), self.checked)
                    .dimmed()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CollectionRegistry, RegistryVariant};
    use crate::schema::UnknownFields;

    fn load(collection: &str, id: &str, source: &str) -> Result<(), EntryError> {
        CollectionRegistry::get(RegistryVariant::WithStack)
            .load_entry(collection, id, source, UnknownFields::Strip)
            .map(|_| ())
    }

    #[test]
    fn test_report_counts() {
        let mut report = ValidationReport::new();
        let inputs = [
            ("Blog", "ok", "---\ntags: []\ndate: 2024-01-01\n---\n"),
            ("Blog", "no-date", "---\ntags: 5\n---\n"),
            ("Videos", "clip", "---\ntags: []\n---\n"),
            ("Stack", "rust", "---\ntags: [lang]\n---\n"),
        ];
        for (collection, id, source) in inputs {
            report.record(collection, id, &load(collection, id, source));
        }

        assert_eq!(report.checked(), 4);
        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.error_count(), 3);
        assert!(!report.is_ok());

        let blog = report.errors_for("Blog/no-date").unwrap();
        assert_eq!(blog[0].target, "tags");
        assert_eq!(blog[1].target, "date");

        let videos = report.errors_for("Videos/clip").unwrap();
        assert_eq!(videos[0].target, "");
        assert!(videos[0].reason.contains("unknown collection"));
    }

    #[test]
    fn test_frontmatter_failure_includes_cause() {
        let mut report = ValidationReport::new();
        report.record("Tools", "t", &load("Tools", "t", "+++\ntags = [\n"));
        let errs = report.errors_for("Tools/t").unwrap();
        assert!(errs[0].reason.contains("never closed"));
    }

    #[test]
    fn test_report_display() {
        let mut report = ValidationReport::new();
        report.record::<()>("Tools", "a", &Ok(()));
        assert!(report.is_ok());
        assert!(report.to_string().contains("all 1 item valid"));
    }
}
