//! Packaging run reporting.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Bytes per mebibyte, used for the size summary.
pub const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Receives notifications while an archive is being written.
///
/// Implement this to print entries as they are added, drive a progress
/// display, or collect names in tests.
pub trait PackageObserver {
    /// Called after a file has been written to the archive.
    ///
    /// # Arguments
    ///
    /// * `archive_name` - Entry name inside the archive (`/`-separated)
    /// * `source` - Path of the file on disk
    ///
    /// An error aborts the run.
    fn on_entry_added(&mut self, archive_name: &str, source: &Path) -> std::io::Result<()>;

    /// Called once after the archive has been finished.
    fn on_complete(&mut self, _report: &PackageReport) -> std::io::Result<()> {
        Ok(())
    }
}

/// No-op implementation of `PackageObserver`.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl PackageObserver for NoopObserver {
    fn on_entry_added(&mut self, _archive_name: &str, _source: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

/// Result of a packaging run.
///
/// # Examples
///
/// ```
/// use rfpack_core::PackageReport;
///
/// let mut report = PackageReport::default();
/// report.archive_size = 3 * 1_048_576 / 2;
/// assert_eq!(report.size_mib(), 1.5);
/// assert_eq!(report.size_display(), "1.50");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageReport {
    /// Path of the archive that was written.
    pub output_path: PathBuf,

    /// Entry names added, in traversal order.
    pub entries: Vec<String>,

    /// Files skipped by the exclusion rules or the `.zip` suffix check.
    pub files_skipped: usize,

    /// Directories pruned from traversal.
    pub directories_pruned: usize,

    /// Total uncompressed bytes read from source files.
    pub bytes_read: u64,

    /// Size of the finished archive in bytes.
    pub archive_size: u64,

    /// Duration of the run.
    pub duration: Duration,
}

impl PackageReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files written to the archive.
    #[must_use]
    pub fn files_added(&self) -> usize {
        self.entries.len()
    }

    /// Archive size in mebibytes (bytes / 1,048,576).
    #[must_use]
    pub fn size_mib(&self) -> f64 {
        self.archive_size as f64 / BYTES_PER_MIB
    }

    /// Archive size in mebibytes, formatted to two decimal places.
    #[must_use]
    pub fn size_display(&self) -> String {
        format!("{:.2}", self.size_mib())
    }
}
