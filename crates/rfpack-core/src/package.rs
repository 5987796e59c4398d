//! Deployment archive creation.
//!
//! A run is strictly sequential: remove any previous archive, create a new
//! one, walk the tree, compress each selected file into it, finish it and
//! read back its size.

use crate::PackageConfig;
use crate::PackageError;
use crate::Result;
use crate::report::PackageObserver;
use crate::report::PackageReport;
use crate::walker::ArchiveEntry;
use crate::walker::FilteredWalker;
use crate::walker::WalkEvent;
use chrono::Datelike;
use chrono::Local;
use chrono::Timelike;
use std::fs::File;
use std::fs::Metadata;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use std::time::SystemTime;
use tracing::debug;
use tracing::info;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Creates the deployment archive described by `config`.
///
/// Any existing file at [`PackageConfig::output_path`] is deleted first;
/// the archive is never appended to. Every file under the root that is not
/// excluded by the rules and does not end in `.zip` is added with Deflate
/// compression under its root-relative name, and `observer` is notified
/// for each one.
///
/// # Examples
///
/// ```no_run
/// use rfpack_core::NoopObserver;
/// use rfpack_core::PackageConfig;
/// use rfpack_core::create_deployment_archive;
///
/// let report = create_deployment_archive(&PackageConfig::default(), &mut NoopObserver)?;
/// println!("{} entries, {} MB", report.files_added(), report.size_display());
/// # Ok::<(), rfpack_core::PackageError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The root is missing or not a directory
/// - The previous archive cannot be removed or the new one cannot be created
/// - A directory or file cannot be read during traversal
/// - The archive cannot be written or finished
///
/// Nothing is retried. If the run fails after the archive was created, the
/// writer is dropped, which still writes the central directory for the
/// entries added so far.
pub fn create_deployment_archive(
    config: &PackageConfig,
    observer: &mut dyn PackageObserver,
) -> Result<PackageReport> {
    config.validate()?;

    if !config.root.is_dir() {
        return Err(PackageError::RootNotFound {
            path: config.root.clone(),
        });
    }

    let output_path = config.output_path();
    remove_previous_archive(&output_path)?;

    let start = Instant::now();
    let file = File::create(&output_path)?;
    let mut report = write_archive(file, &config.root, config, observer)?;

    report.archive_size = std::fs::metadata(&output_path)?.len();
    report.output_path = output_path;
    report.duration = start.elapsed();

    info!(
        entries = report.files_added(),
        bytes = report.archive_size,
        path = %report.output_path.display(),
        "deployment archive finished"
    );
    observer.on_complete(&report)?;

    Ok(report)
}

/// Deletes the archive left by a previous run, if any.
fn remove_previous_archive(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed previous archive");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Walks `root` and writes every selected file into a ZIP on `writer`.
///
/// On an early return `zip` is dropped, and `ZipWriter`'s `Drop` finishes
/// the archive, so the output is never left without a central directory.
fn write_archive<W: Write + Seek>(
    writer: W,
    root: &Path,
    config: &PackageConfig,
    observer: &mut dyn PackageObserver,
) -> Result<PackageReport> {
    let mut zip = ZipWriter::new(writer);
    let mut report = PackageReport::default();
    let options = file_options(config);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for event in FilteredWalker::new(root).walk() {
        match event? {
            // The archive being written, when its name does not end in .zip
            WalkEvent::Include(entry) if entry.archive_name() == config.output_name => {
                report.files_skipped += 1;
            }
            WalkEvent::Include(entry) => {
                report.bytes_read += add_file(&mut zip, &entry, options, &mut buffer)?;
                observer.on_entry_added(entry.archive_name(), entry.source())?;
                report.entries.push(entry.archive_name().to_string());
            }
            WalkEvent::Skip { path, reason } => {
                debug!(path = %path.display(), ?reason, "skipped file");
                report.files_skipped += 1;
            }
            WalkEvent::Prune { path, pattern } => {
                debug!(path = %path.display(), pattern, "pruned directory");
                report.directories_pruned += 1;
            }
        }
    }

    zip.finish()?;

    Ok(report)
}

/// Deflate options for every entry.
fn file_options(config: &PackageConfig) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    match config.compression_level {
        Some(level) => options.compression_level(Some(i64::from(level))),
        None => options,
    }
}

/// Options for one file: ZIP64 when it needs it, plus the source's
/// modification time and Unix mode.
fn entry_options(options: SimpleFileOptions, metadata: &Metadata) -> SimpleFileOptions {
    let mut options = options.large_file(metadata.len() >= u64::from(u32::MAX));

    // Times outside the DOS range (before 1980) keep the default timestamp
    if let Some(modified) = metadata.modified().ok().and_then(zip_timestamp) {
        options = options.last_modified_time(modified);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        options = options.unix_permissions(metadata.permissions().mode());
    }

    options
}

/// Converts a file time to a ZIP timestamp in local time.
fn zip_timestamp(time: SystemTime) -> Option<DateTime> {
    let local: chrono::DateTime<Local> = time.into();
    DateTime::from_date_and_time(
        u16::try_from(local.year()).ok()?,
        u8::try_from(local.month()).ok()?,
        u8::try_from(local.day()).ok()?,
        u8::try_from(local.hour()).ok()?,
        u8::try_from(local.minute()).ok()?,
        u8::try_from(local.second()).ok()?,
    )
    .ok()
}

/// Copies one file into the archive, returning the bytes read.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &ArchiveEntry,
    options: SimpleFileOptions,
    buffer: &mut [u8],
) -> Result<u64> {
    let read_error = |source: std::io::Error| PackageError::ReadEntry {
        path: entry.source().to_path_buf(),
        source,
    };

    let mut file = File::open(entry.source()).map_err(read_error)?;
    let metadata = file.metadata().map_err(read_error)?;
    zip.start_file(entry.archive_name(), entry_options(options, &metadata))?;

    let mut bytes_read = 0u64;
    loop {
        let n = file.read(buffer).map_err(read_error)?;
        if n == 0 {
            break;
        }
        zip.write_all(&buffer[..n])?;
        bytes_read += n as u64;
    }

    Ok(bytes_read)
}
