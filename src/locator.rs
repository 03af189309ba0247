//! Locating the SumatraPDF executable.
//!
//! The dispatcher never builds executable paths itself. It asks an
//! [`ExecutableLocator`], so applications can bundle SumatraPDF wherever they
//! like and tests can point at any program.

use std::path::{Path, PathBuf};

use crate::error::{PrintError, Result};

/// File name of the bundled SumatraPDF build.
pub const DEFAULT_EXECUTABLE: &str = "SumatraPDF-3.4.6-32.exe";

/// Environment variable that overrides the bundled executable location.
pub const EXECUTABLE_ENV: &str = "PDFPRINT_SUMATRA_PATH";

/// Finds the print executable.
pub trait ExecutableLocator: Send + Sync {
    /// Return the path of an existing executable.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::ExecutableNotFound`] when no candidate exists.
    fn locate(&self) -> Result<PathBuf>;
}

/// Always returns one configured path, after checking that it exists.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    path: PathBuf,
}

impl FixedLocator {
    /// Locate the executable at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExecutableLocator for FixedLocator {
    fn locate(&self) -> Result<PathBuf> {
        if self.path.is_file() {
            Ok(self.path.clone())
        } else {
            Err(PrintError::executable_not_found(self.path.clone()))
        }
    }
}

/// Looks for the bundled executable in the usual places.
///
/// Candidates, in order:
/// 1. the path in [`EXECUTABLE_ENV`], if set
/// 2. the directory of the running executable
/// 3. each configured search directory
#[derive(Debug, Clone)]
pub struct BundledLocator {
    file_name: String,
    search_dirs: Vec<PathBuf>,
    use_env: bool,
}

impl BundledLocator {
    /// Look for [`DEFAULT_EXECUTABLE`].
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_EXECUTABLE.to_string(),
            search_dirs: Vec::new(),
            use_env: true,
        }
    }

    /// Look for a different file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Add a directory to search after the executable's own directory.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Ignore [`EXECUTABLE_ENV`].
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if self.use_env
            && let Some(path) = std::env::var_os(EXECUTABLE_ENV).filter(|p| !p.is_empty())
        {
            candidates.push(PathBuf::from(path));
        }

        if let Some(dir) = std::env::current_exe()
            .ok()
            .as_deref()
            .and_then(Path::parent)
        {
            candidates.push(dir.join(&self.file_name));
        }

        candidates.extend(self.search_dirs.iter().map(|dir| dir.join(&self.file_name)));
        candidates
    }
}

impl Default for BundledLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutableLocator for BundledLocator {
    fn locate(&self) -> Result<PathBuf> {
        let candidates = self.candidates();

        for candidate in &candidates {
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "found print executable");
                return Ok(candidate.clone());
            }
            tracing::trace!(path = %candidate.display(), "print executable not here");
        }

        let last = candidates
            .last()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(&self.file_name));
        Err(PrintError::executable_not_found(last))
    }
}
