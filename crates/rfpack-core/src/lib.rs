//! Deployment archive packaging.
//!
//! `rfpack-core` walks a project tree and writes a single Deflate-compressed
//! ZIP archive of it, leaving out development artifacts: version-control
//! metadata, dependency caches, build output and local environment files.
//! Excluded directories are pruned during traversal, so nothing below them
//! is ever read.
//!
//! # Examples
//!
//! ```no_run
//! use rfpack_core::NoopObserver;
//! use rfpack_core::PackageConfig;
//! use rfpack_core::create_deployment_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = create_deployment_archive(&PackageConfig::default(), &mut NoopObserver)?;
//! println!("Created {} ({} MB)", report.output_path.display(), report.size_display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod package;
pub mod report;
pub mod rules;
pub mod walker;

// Re-export main API types
pub use config::DEFAULT_ARCHIVE_NAME;
pub use config::PackageConfig;
pub use error::PackageError;
pub use error::Result;
pub use package::create_deployment_archive;
pub use report::NoopObserver;
pub use report::PackageObserver;
pub use report::PackageReport;
pub use rules::ExclusionRuleSet;
pub use rules::should_exclude;
pub use walker::ArchiveEntry;
pub use walker::FilteredWalker;
