//! Operating-system guard.
//!
//! SumatraPDF is a Windows program, so every print job checks the platform
//! before doing anything else.

use std::fmt;

use crate::error::{PrintError, Result};

/// Operating system a print job runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Anything else, by its `std::env::consts::OS` name.
    Other(&'static str),
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`.
    pub fn from_os(os: &'static str) -> Self {
        if os == "windows" {
            Self::Windows
        } else {
            Self::Other(os)
        }
    }

    /// Whether SumatraPDF can run here.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Fail with [`PrintError::UnsupportedPlatform`] unless supported.
    pub fn ensure_supported(&self) -> Result<()> {
        match self {
            Self::Windows => Ok(()),
            Self::Other(os) => Err(PrintError::unsupported_platform(*os)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => f.write_str("windows"),
            Self::Other(os) => f.write_str(os),
        }
    }
}
