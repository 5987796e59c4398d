//! Directory tree walking with traversal-time pruning.
//!
//! The walker visits the tree top-down in file-name order. Excluded
//! directories are pruned with [`walkdir::IntoIter::skip_current_dir`] the
//! moment they are reached, so nothing beneath them is ever read.

use crate::PackageError;
use crate::Result;
use crate::rules;
use crate::rules::ExclusionRuleSet;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A file selected for the archive.
///
/// # Examples
///
/// ```
/// use rfpack_core::walker::ArchiveEntry;
/// use std::path::Path;
///
/// let entry = ArchiveEntry::new(Path::new("./src/app.js"), Path::new("src/app.js"))?;
/// assert_eq!(entry.archive_name(), "src/app.js");
/// # Ok::<(), rfpack_core::PackageError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    source: PathBuf,
    archive_name: String,
}

impl ArchiveEntry {
    /// Creates an entry from a source path and its root-relative path.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::InvalidEntryName`] if the relative path is not
    /// valid UTF-8 or contains anything other than plain components.
    pub fn new(source: &Path, relative: &Path) -> Result<Self> {
        Ok(Self {
            source: source.to_path_buf(),
            archive_name: normalize_zip_path(relative)?,
        })
    }

    /// Path of the file on disk.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Entry name inside the archive, `/`-separated.
    #[must_use]
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }
}

/// Why a file was left out of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Path contains an exclusion pattern.
    Excluded {
        /// First pattern found in the path.
        pattern: &'static str,
    },
    /// File name ends with `.zip`.
    ArchiveArtifact,
    /// Not a regular file (symlink to a directory, socket, fifo).
    NotAFile,
}

/// One step of a filtered walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// File to add to the archive.
    Include(ArchiveEntry),
    /// File seen but not archived.
    Skip {
        /// Path relative to the traversal root.
        path: PathBuf,
        /// Reason it was skipped.
        reason: SkipReason,
    },
    /// Directory dropped from traversal along with everything below it.
    Prune {
        /// Path relative to the traversal root.
        path: PathBuf,
        /// Pattern that matched.
        pattern: &'static str,
    },
}

/// Walks a directory tree applying the deployment exclusion rules.
///
/// # Examples
///
/// ```no_run
/// use rfpack_core::walker::FilteredWalker;
/// use rfpack_core::walker::WalkEvent;
/// use std::path::Path;
///
/// let walker = FilteredWalker::new(Path::new("."));
/// for event in walker.walk() {
///     if let WalkEvent::Include(entry) = event? {
///         println!("Would add: {}", entry.archive_name());
///     }
/// }
/// # Ok::<(), rfpack_core::PackageError>(())
/// ```
pub struct FilteredWalker<'a> {
    root: &'a Path,
    rules: ExclusionRuleSet,
}

impl<'a> FilteredWalker<'a> {
    /// Creates a walker for the given root using the default rules.
    #[must_use]
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            rules: ExclusionRuleSet::default(),
        }
    }

    /// Returns an iterator over walk events.
    ///
    /// Symlinks are not followed for traversal. A symlink to a regular file
    /// is included (its target's content is what gets read), a symlink to a
    /// directory is skipped.
    ///
    /// # Errors
    ///
    /// Items are errors when a directory cannot be read or when a symlink
    /// target cannot be resolved.
    pub fn walk(&self) -> FilteredWalk<'a> {
        FilteredWalk {
            root: self.root,
            rules: self.rules,
            inner: WalkDir::new(self.root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter(),
        }
    }
}

/// Iterator returned by [`FilteredWalker::walk`].
pub struct FilteredWalk<'a> {
    root: &'a Path,
    rules: ExclusionRuleSet,
    inner: walkdir::IntoIter,
}

impl Iterator for FilteredWalk<'_> {
    type Item = Result<WalkEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(self.root).to_path_buf();
                    return Some(Err(PackageError::Walk { path, source: e }));
                }
            };

            // The root itself is never filtered
            if entry.depth() == 0 {
                continue;
            }

            match self.classify(&entry) {
                Ok(Some(event)) => return Some(Ok(event)),
                // Kept directory, no event of its own
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl FilteredWalk<'_> {
    fn classify(&mut self, entry: &walkdir::DirEntry) -> Result<Option<WalkEvent>> {
        let relative = relative_path(entry.path(), self.root)?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            if let Some(pattern) = self.rules.matching_pattern(&relative) {
                self.inner.skip_current_dir();
                return Ok(Some(WalkEvent::Prune {
                    path: relative,
                    pattern,
                }));
            }
            return Ok(None);
        }

        if let Some(pattern) = self.rules.matching_pattern(&relative) {
            return Ok(Some(WalkEvent::Skip {
                path: relative,
                reason: SkipReason::Excluded { pattern },
            }));
        }

        if rules::is_archive_artifact(&relative) {
            return Ok(Some(WalkEvent::Skip {
                path: relative,
                reason: SkipReason::ArchiveArtifact,
            }));
        }

        let is_file = if file_type.is_symlink() {
            std::fs::metadata(entry.path())
                .map_err(|source| PackageError::ReadEntry {
                    path: entry.path().to_path_buf(),
                    source,
                })?
                .is_file()
        } else {
            file_type.is_file()
        };

        if !is_file {
            return Ok(Some(WalkEvent::Skip {
                path: relative,
                reason: SkipReason::NotAFile,
            }));
        }

        ArchiveEntry::new(entry.path(), &relative).map(|entry| Some(WalkEvent::Include(entry)))
    }
}

/// Computes a path relative to the traversal root.
fn relative_path(path: &Path, root: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| {
            PackageError::Io(std::io::Error::other(format!(
                "path {} is not under root directory: {}",
                path.display(),
                root.display()
            )))
        })
}

/// Converts a relative path to a ZIP entry name.
///
/// ZIP requires forward slashes regardless of platform.
fn normalize_zip_path(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| PackageError::InvalidEntryName {
                    path: path.to_path_buf(),
                })?;
                parts.push(part);
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(PackageError::InvalidEntryName {
                    path: path.to_path_buf(),
                });
            }
        }
    }
    Ok(parts.join("/"))
}
