//! Exclusion rules for deployment packaging.
//!
//! A path is excluded when its string form contains any of the fixed
//! patterns as a literal substring. There is no glob engine here: the
//! pattern `.env.*.local` matches only paths containing that exact text,
//! so a real file such as `.env.prod.local` is NOT excluded by it. That
//! behavior is kept deliberately because changing it changes which files
//! ship.

use std::path::Path;

/// Patterns excluded from every deployment archive, in evaluation order.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "__pycache__",
    ".DS_Store",
    ".env.local",
    ".env.*.local",
];

/// File name suffix that is never archived, regardless of the patterns.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Immutable ordered set of literal exclusion patterns.
///
/// The set is fixed at build time; the only way to obtain one is
/// [`ExclusionRuleSet::default`].
///
/// # Examples
///
/// ```
/// use rfpack_core::rules::ExclusionRuleSet;
/// use std::path::Path;
///
/// let rules = ExclusionRuleSet::default();
/// assert!(rules.should_exclude(Path::new("node_modules/react/index.js")));
/// assert!(!rules.should_exclude(Path::new("src/index.js")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionRuleSet {
    patterns: &'static [&'static str],
}

impl Default for ExclusionRuleSet {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_EXCLUDE_PATTERNS,
        }
    }
}

impl ExclusionRuleSet {
    /// Returns the patterns in evaluation order.
    #[must_use]
    pub fn patterns(&self) -> &'static [&'static str] {
        self.patterns
    }

    /// Returns `true` if the path contains any pattern as a substring.
    ///
    /// Matching is against the whole path string, not individual
    /// components, so `.git` also excludes `.github/` and `.gitignore`, and
    /// `dist` also excludes `distribution.md`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfpack_core::rules::ExclusionRuleSet;
    /// use std::path::Path;
    ///
    /// let rules = ExclusionRuleSet::default();
    /// assert!(rules.should_exclude(Path::new(".github/workflows/ci.yml")));
    /// assert!(rules.should_exclude(Path::new("config/.env.*.local")));
    ///
    /// // Literal, not a glob.
    /// assert!(!rules.should_exclude(Path::new("config/.env.prod.local")));
    /// ```
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.matching_pattern_in(&path_str).is_some()
    }

    /// Returns the first pattern contained in the path, if any.
    #[must_use]
    pub fn matching_pattern(&self, path: &Path) -> Option<&'static str> {
        self.matching_pattern_in(&path.to_string_lossy())
    }

    fn matching_pattern_in(&self, path_str: &str) -> Option<&'static str> {
        self.patterns
            .iter()
            .copied()
            .find(|pattern| path_str.contains(pattern))
    }
}

/// Checks a path against the default rule set.
///
/// # Examples
///
/// ```
/// use rfpack_core::rules;
/// use std::path::Path;
///
/// assert!(rules::should_exclude(Path::new("./.git/HEAD")));
/// assert!(rules::should_exclude(Path::new("app/__pycache__/mod.pyc")));
/// assert!(!rules::should_exclude(Path::new("./a.txt")));
/// ```
#[must_use]
pub fn should_exclude(path: &Path) -> bool {
    ExclusionRuleSet::default().should_exclude(path)
}

/// Returns `true` if the file name ends with `.zip`.
///
/// Keeps the output archive, and any other zip lying in the tree, out of
/// the package independently of the pattern list. Only the final component
/// is considered.
///
/// # Examples
///
/// ```
/// use rfpack_core::rules;
/// use std::path::Path;
///
/// assert!(rules::is_archive_artifact(Path::new("rf-dashboard-deployment.zip")));
/// assert!(rules::is_archive_artifact(Path::new("assets/bundle.zip")));
/// assert!(!rules::is_archive_artifact(Path::new("assets/zip/readme.md")));
/// assert!(!rules::is_archive_artifact(Path::new("archive.ZIP")));
/// ```
#[must_use]
pub fn is_archive_artifact(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(ARCHIVE_SUFFIX))
}
