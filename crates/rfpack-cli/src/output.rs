//! Console output for a packaging run.

use console::Term;
use rfpack_core::PackageObserver;
use rfpack_core::PackageReport;
use std::io;
use std::path::Path;

/// Prints one `Added:` line per entry and the final size summary.
///
/// Write failures on stdout (a closed pipe) are returned and end the run.
pub struct ConsoleReporter {
    term: Term,
    archive_name: String,
}

impl ConsoleReporter {
    pub fn new(archive_name: impl Into<String>) -> Self {
        Self {
            term: Term::stdout(),
            archive_name: archive_name.into(),
        }
    }

    fn summary_line(&self, report: &PackageReport) -> String {
        format!(
            "✅ Created {} ({} MB)",
            self.archive_name,
            report.size_display()
        )
    }
}

/// Formats the per-entry line.
pub fn added_line(archive_name: &str) -> String {
    format!("Added: {archive_name}")
}

impl PackageObserver for ConsoleReporter {
    fn on_entry_added(&mut self, archive_name: &str, _source: &Path) -> io::Result<()> {
        self.term.write_line(&added_line(archive_name))
    }

    fn on_complete(&mut self, report: &PackageReport) -> io::Result<()> {
        self.term.write_line("")?;
        self.term.write_line(&self.summary_line(report))
    }
}
