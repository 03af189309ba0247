//! Error types for pdfprint.
//!
//! Every failure a print job can run into is a [`PrintError`]. Errors are
//! grouped into categories that tell the caller whether correcting the input
//! will help, whether the environment is at fault, or whether the external
//! print executable itself failed.
//!
//! # Error Categories
//!
//! - **Validation Errors**: invalid option values, missing or non-PDF input
//! - **Environment Errors**: unsupported operating system, executable not found
//! - **Execution Errors**: the print executable failed to spawn, exited with a
//!   non-zero status, or timed out
//! - **I/O Errors**: the temporary copy of an in-memory PDF could not be written

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for pdfprint operations.
pub type Result<T> = std::result::Result<T, PrintError>;

/// Broad classification of a [`PrintError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller input is wrong; fix the input and try again.
    Validation,
    /// The host cannot run the print executable.
    Environment,
    /// The print executable ran (or tried to) and failed.
    Execution,
    /// Local file system failure.
    Io,
}

/// Main error type for pdfprint operations.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// An enumerated option was given a value outside its allowed set.
    #[error("Invalid {field} provided. Valid names: {}", valid.join(", "))]
    InvalidOption {
        /// Name of the option, e.g. `subset`.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Every accepted value, in documentation order.
        valid: &'static [&'static str],
    },

    /// No PDF source was given.
    #[error("No PDF specified")]
    NoPdfSpecified,

    /// The PDF path does not exist.
    #[error("No such file: {}", path.display())]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The in-memory buffer does not look like a PDF document.
    #[error("File has to be a PDF")]
    NotAPdf,

    /// No printer was named and the printer policy forbids falling back to the
    /// system default printer.
    #[error("Printer name required")]
    PrinterRequired,

    /// An options file or option combination could not be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// An argument cannot be passed safely through `cmd.exe` in shell mode.
    #[error("Cannot pass {argument:?} through the command interpreter: {reason}")]
    UnsafeShellArgument {
        /// The offending argument, lossily converted.
        argument: String,
        /// Why it was refused.
        reason: &'static str,
    },

    /// The current operating system cannot run the print executable.
    #[error("Operating system not supported: {os}. Printing requires Windows")]
    UnsupportedPlatform {
        /// Name of the detected operating system.
        os: String,
    },

    /// The print executable could not be found.
    #[error("Print executable not found: {}", path.display())]
    ExecutableNotFound {
        /// Location that was checked last.
        path: PathBuf,
    },

    /// The print executable could not be started.
    #[error("Failed to start {}\n  Reason: {source}", program.display())]
    SpawnFailed {
        /// Program that was started.
        program: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The print executable exited unsuccessfully.
    #[error("{} exited with {}{}", program.display(), describe_code(*code), describe_stderr(stderr))]
    ProcessFailed {
        /// Program that was run.
        program: PathBuf,
        /// Exit code, if the process was not terminated by a signal.
        code: Option<i32>,
        /// Captured standard error output.
        stderr: String,
    },

    /// The print executable did not finish within the configured timeout.
    #[error("{} did not finish within {:.1}s", program.display(), timeout.as_secs_f64())]
    TimedOut {
        /// Program that was run.
        program: PathBuf,
        /// Configured timeout.
        timeout: Duration,
    },

    /// The temporary copy of an in-memory PDF could not be written.
    #[error("Failed to write temporary PDF file\n  Reason: {source}")]
    TempFile {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n  Output: {stderr}")
    }
}

impl From<anyhow::Error> for PrintError {
    fn from(err: anyhow::Error) -> Self {
        Self::other(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for PrintError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl PrintError {
    /// Create an InvalidOption error.
    pub fn invalid_option(
        field: &'static str,
        value: impl Into<String>,
        valid: &'static [&'static str],
    ) -> Self {
        Self::InvalidOption {
            field,
            value: value.into(),
            valid,
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create an ExecutableNotFound error.
    pub fn executable_not_found(path: PathBuf) -> Self {
        Self::ExecutableNotFound { path }
    }

    /// Create an UnsupportedPlatform error.
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform { os: os.into() }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOption { .. }
            | Self::NoPdfSpecified
            | Self::FileNotFound { .. }
            | Self::NotAPdf
            | Self::PrinterRequired
            | Self::InvalidConfig { .. }
            | Self::UnsafeShellArgument { .. } => ErrorCategory::Validation,
            Self::UnsupportedPlatform { .. } | Self::ExecutableNotFound { .. } => {
                ErrorCategory::Environment
            }
            Self::SpawnFailed { .. } | Self::ProcessFailed { .. } | Self::TimedOut { .. } => {
                ErrorCategory::Execution
            }
            Self::TempFile { .. } | Self::Io { .. } | Self::Other { .. } => ErrorCategory::Io,
        }
    }

    /// Check if the caller can fix this error by correcting its input.
    pub fn is_validation(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    /// Check if running the same job again might succeed.
    ///
    /// The library never retries on its own; this only informs callers.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Execution
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidOption { .. } => 1,
            Self::InvalidConfig { .. } => 1,
            Self::PrinterRequired => 1,
            Self::NoPdfSpecified => 1,
            Self::UnsafeShellArgument { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAPdf => 3,
            Self::UnsupportedPlatform { .. } => 4,
            Self::ExecutableNotFound { .. } => 4,
            Self::SpawnFailed { .. } => 5,
            Self::ProcessFailed { .. } => 6,
            Self::TimedOut { .. } => 7,
            Self::TempFile { .. } => 5,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
