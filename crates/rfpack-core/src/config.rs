//! Configuration for a packaging run.

use crate::PackageError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// Name of the archive written into the traversal root.
pub const DEFAULT_ARCHIVE_NAME: &str = "rf-dashboard-deployment.zip";

/// Configuration for a packaging run.
///
/// The exclusion rules are not part of the configuration; they are fixed
/// (see [`crate::rules::ExclusionRuleSet`]).
///
/// # Examples
///
/// ```
/// use rfpack_core::PackageConfig;
/// use std::path::Path;
///
/// let config = PackageConfig::default();
/// assert_eq!(config.root, Path::new("."));
/// assert_eq!(config.output_path(), Path::new("./rf-dashboard-deployment.zip"));
///
/// let custom = PackageConfig::default()
///     .with_root("/srv/app")
///     .with_compression_level(9);
/// assert_eq!(custom.output_path(), Path::new("/srv/app/rf-dashboard-deployment.zip"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// Directory to package.
    ///
    /// Default: `.` (the current working directory).
    pub root: PathBuf,

    /// File name of the archive, created inside `root`.
    ///
    /// Default: `rf-dashboard-deployment.zip`.
    pub output_name: String,

    /// Deflate compression level (1-9).
    ///
    /// `None` uses the zip library's default level.
    ///
    /// Default: `None`.
    pub compression_level: Option<u8>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output_name: DEFAULT_ARCHIVE_NAME.to_string(),
            compression_level: None,
        }
    }
}

impl PackageConfig {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the traversal root.
    #[must_use]
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Sets the archive file name.
    #[must_use]
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Sets the Deflate compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Full path of the archive file.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_name)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is outside `1..=9`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfpack_core::PackageConfig;
    ///
    /// assert!(PackageConfig::default().validate().is_ok());
    /// assert!(PackageConfig::default().with_compression_level(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(PackageError::InvalidCompressionLevel { level });
        }
        Ok(())
    }
}
