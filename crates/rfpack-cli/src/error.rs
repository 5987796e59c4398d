//! Error conversion for the CLI.
//!
//! Core errors are passed through unchanged with the archive name attached
//! as context; `main` returns them so the process exits non-zero and
//! `anyhow` prints the full chain to stderr.

use anyhow::Context;
use rfpack_core::PackageError;

/// Attaches the archive being built to a core error.
pub fn add_archive_context<T>(
    result: Result<T, PackageError>,
    archive_name: &str,
) -> anyhow::Result<T> {
    result.with_context(|| format!("failed to create {archive_name}"))
}
