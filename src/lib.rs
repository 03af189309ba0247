//! pdfprint - Print PDF files on Windows through SumatraPDF.
//!
//! This library turns a [`PrintOptions`] record into a SumatraPDF command
//! line and runs it. It supports:
//!
//! - Printing files on disk or PDF bytes held in memory
//! - Named printers, the system default printer, or the print dialog
//! - Page ranges, odd/even subsets, orientation, scaling, color mode,
//!   duplex, paper bin, paper size and copy count
//! - Pluggable executable lookup and process execution
//! - Guaranteed removal of temporary files
//!
//! # Examples
//!
//! ## Printing a file
//!
//! ```no_run
//! use pdfprint::config::PrintOptions;
//!
//! # async fn example() -> pdfprint::Result<()> {
//! let options = PrintOptions::new()
//!     .with_printer("HP-LaserJet")
//!     .with_copies(2)
//!     .with_monochrome(true);
//!
//! pdfprint::print("C:/docs/report.pdf", &options).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Printing bytes with a custom executable
//!
//! ```no_run
//! use pdfprint::Printer;
//! use pdfprint::config::{PrintOptions, Scale};
//! use pdfprint::locator::FixedLocator;
//! use std::time::Duration;
//!
//! # async fn example(bytes: Vec<u8>) -> pdfprint::Result<()> {
//! let printer = Printer::new().with_locator(FixedLocator::new("C:/tools/SumatraPDF.exe"));
//! let options = PrintOptions::new()
//!     .with_scale(Scale::Fit)
//!     .with_timeout(Duration::from_secs(60));
//!
//! printer.print(bytes, &options).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod output;
pub mod platform;
pub mod printer;
pub mod runner;
pub mod settings;
pub mod source;

// Re-export commonly used types
pub use config::PrintOptions;
pub use error::{PrintError, Result};
pub use printer::Printer;
pub use source::PdfSource;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Print `source` with a default [`Printer`].
///
/// Shorthand for `Printer::new().print(source, options)`.
///
/// # Errors
///
/// See [`Printer::print`].
pub async fn print(source: impl Into<PdfSource>, options: &PrintOptions) -> Result<()> {
    Printer::new().print(source, options).await
}
