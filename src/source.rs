//! PDF sources and their temporary files.
//!
//! A print job reads its document either from a path the caller owns or from
//! an in-memory buffer. SumatraPDF only accepts paths, so a buffer is written
//! to a uniquely named `.pdf` file first and removed again once the job is
//! over, whatever its outcome.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tokio::task;

use crate::error::{PrintError, Result};

/// Leading bytes of every PDF file.
pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// Trailer marker that ends a PDF file.
pub const PDF_EOF_MARKER: &[u8] = b"%%EOF";

/// Document to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfSource {
    /// A file owned by the caller. It is never modified or removed.
    Path(PathBuf),
    /// Raw PDF bytes.
    Bytes(Vec<u8>),
}

impl From<PathBuf> for PdfSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for PdfSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for PdfSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for PdfSource {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for PdfSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for PdfSource {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

/// Check that `bytes` start with `%PDF-` and carry an `%%EOF` marker after it.
///
/// # Examples
///
/// ```
/// use pdfprint::source::is_pdf;
///
/// assert!(is_pdf(b"%PDF-1.4\n%%EOF\n"));
/// assert!(!is_pdf(b"<html></html>"));
/// ```
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_SIGNATURE)
        && bytes[PDF_SIGNATURE.len()..]
            .windows(PDF_EOF_MARKER.len())
            .any(|window| window == PDF_EOF_MARKER)
}

/// A source that SumatraPDF can open: a path, plus the temporary file that
/// backs it when the source was a buffer.
#[derive(Debug)]
pub struct ResolvedSource {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl ResolvedSource {
    /// Validate a caller-owned path without touching the file system beyond
    /// an existence check.
    ///
    /// # Errors
    ///
    /// - [`PrintError::NoPdfSpecified`] for an empty path
    /// - [`PrintError::FileNotFound`] when nothing exists at `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(PrintError::NoPdfSpecified);
        }

        if !path.try_exists()? {
            return Err(PrintError::file_not_found(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            temp: None,
        })
    }

    /// Resolve `source`, writing buffers into `temp_dir`.
    ///
    /// # Errors
    ///
    /// Path errors as in [`ResolvedSource::from_path`];
    /// [`PrintError::NotAPdf`] when a buffer fails the signature check, and
    /// [`PrintError::TempFile`] when the temporary file cannot be written.
    pub async fn resolve(source: PdfSource, temp_dir: &Path) -> Result<Self> {
        match source {
            PdfSource::Path(path) => Self::from_path(&path),
            PdfSource::Bytes(bytes) => {
                if !is_pdf(&bytes) {
                    return Err(PrintError::NotAPdf);
                }

                let temp_dir = temp_dir.to_path_buf();
                let temp = task::spawn_blocking(move || write_temp_pdf(&bytes, &temp_dir))
                    .await
                    .map_err(|err| PrintError::other(format!("temp file task failed: {err}")))??;

                tracing::debug!(path = %temp.display(), "wrote temporary PDF");

                Ok(Self {
                    path: temp.to_path_buf(),
                    temp: Some(temp),
                })
            }
        }
    }

    /// Path to hand to SumatraPDF.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the path points at a temporary copy owned by this job.
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }

    /// Remove the temporary file, if any.
    ///
    /// Failures are logged and swallowed: cleanup never changes the outcome
    /// of the print job.
    pub fn cleanup(self) {
        if let Some(temp) = self.temp
            && let Err(err) = temp.close()
        {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to remove temporary PDF"
            );
        }
    }
}

fn write_temp_pdf(bytes: &[u8], dir: &Path) -> Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("pdfprint-")
        .suffix(".pdf")
        .rand_bytes(12)
        .tempfile_in(dir)
        .map_err(|source| PrintError::TempFile { source })?;

    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|source| PrintError::TempFile { source })?;

    // Close the handle so SumatraPDF can open the file on Windows.
    Ok(file.into_temp_path())
}
