//! Command-line arguments for SumatraPDF.
//!
//! [`ArgumentList`] turns [`PrintOptions`] into the ordered argument vector
//! SumatraPDF expects:
//!
//! ```text
//! (-print-dialog | -print-to <printer> [-silent] | -print-to-default [-silent])
//! [-print-settings <tokens>]
//! <pdf>
//! ```
//!
//! Every value is its own argument; nothing is quoted or joined into a shell
//! string, so printer names with spaces or quotes pass through unchanged.

use std::ffi::OsString;
use std::path::Path;

use crate::config::{PrintOptions, PrinterPolicy};
use crate::error::{PrintError, Result};
use crate::settings::PrintSettings;

/// Show the system print dialog.
pub const PRINT_DIALOG: &str = "-print-dialog";
/// Print to the named printer.
pub const PRINT_TO: &str = "-print-to";
/// Print to the system default printer.
pub const PRINT_TO_DEFAULT: &str = "-print-to-default";
/// Suppress SumatraPDF's own windows.
pub const SILENT: &str = "-silent";
/// Comma-separated page and paper settings.
pub const PRINT_SETTINGS: &str = "-print-settings";

/// Ordered SumatraPDF arguments, excluding the program itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    args: Vec<OsString>,
}

impl ArgumentList {
    /// Build every argument that precedes the PDF path.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::PrinterRequired`] when no printer is named, the
    /// dialog is not requested and the policy is [`PrinterPolicy::Required`].
    pub fn from_options(options: &PrintOptions) -> Result<Self> {
        let mut list = Self::default();

        if options.print_dialog {
            list.push(PRINT_DIALOG);
        } else {
            match (options.printer_name(), options.printer_policy) {
                (Some(printer), _) => {
                    list.push(PRINT_TO);
                    list.push(printer);
                }
                (None, PrinterPolicy::DefaultPrinter) => list.push(PRINT_TO_DEFAULT),
                (None, PrinterPolicy::Required) => return Err(PrintError::PrinterRequired),
            }

            if options.is_silent() {
                list.push(SILENT);
            }
        }

        let settings = PrintSettings::from_options(options);
        if !settings.is_empty() {
            list.push(PRINT_SETTINGS);
            list.push(settings.to_string());
        }

        Ok(list)
    }

    /// Append one argument.
    pub fn push(&mut self, arg: impl Into<OsString>) {
        self.args.push(arg.into());
    }

    /// Append the PDF path; it must be the last argument.
    pub fn with_pdf(mut self, pdf: &Path) -> Self {
        self.push(pdf.as_os_str());
        self
    }

    /// The arguments, in order.
    pub fn as_slice(&self) -> &[OsString] {
        &self.args
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True when there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Lossy rendering for logs and `--dry-run` output.
    pub fn display_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl IntoIterator for ArgumentList {
    type Item = OsString;
    type IntoIter = std::vec::IntoIter<OsString>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.into_iter()
    }
}
