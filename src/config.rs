//! Print options for pdfprint.
//!
//! [`PrintOptions`] is the single configuration record of a print job. It can
//! be built in code with the chainable `with_*` setters, loaded from a JSON
//! options file, or assembled by the command-line front end. Enumerated
//! settings are real enums; text is turned into them through [`FromStr`],
//! which rejects anything outside the allowed set with a message naming every
//! valid value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{PrintError, Result};

/// Declares a closed set of print-setting names understood by SumatraPDF.
///
/// Each generated enum parses from its lowercase name, displays as that name,
/// and round-trips through serde as a plain string.
macro_rules! setting_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every accepted name, in the order SumatraPDF documents them.
            pub const VALID: &'static [&'static str] = &[$($text),+];

            /// The token written into the print settings.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = PrintError;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err(PrintError::invalid_option($field, s, Self::VALID)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = PrintError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

setting_enum! {
    /// Restricts printing to odd- or even-numbered pages.
    Subset, "subset" {
        /// Odd pages only.
        Odd => "odd",
        /// Even pages only.
        Even => "even",
    }
}

setting_enum! {
    /// Page orientation.
    Orientation, "orientation" {
        /// Portrait.
        Portrait => "portrait",
        /// Landscape.
        Landscape => "landscape",
    }
}

setting_enum! {
    /// How page content is fitted to the paper.
    Scale, "scale" {
        /// Print at the document's own size.
        NoScale => "noscale",
        /// Shrink pages that are larger than the paper.
        Shrink => "shrink",
        /// Scale every page to fill the paper.
        Fit => "fit",
    }
}

setting_enum! {
    /// Duplex mode.
    Side, "side" {
        /// Printer's default duplex mode.
        Duplex => "duplex",
        /// Duplex, flipped on the short edge.
        DuplexShort => "duplexshort",
        /// Duplex, flipped on the long edge.
        DuplexLong => "duplexlong",
        /// Single-sided.
        Simplex => "simplex",
    }
}

/// What to do when no printer is named and no print dialog is requested.
///
/// Parses from `"default"`, `"defaultPrinter"` or `"required"`, in JSON as
/// well as on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PrinterPolicy {
    /// Print to the system default printer.
    #[default]
    DefaultPrinter,
    /// Fail with [`PrintError::PrinterRequired`].
    Required,
}

impl PrinterPolicy {
    /// Every accepted name.
    pub const VALID: &'static [&'static str] = &["default", "defaultPrinter", "required"];

    /// The name written when options are serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultPrinter => "defaultPrinter",
            Self::Required => "required",
        }
    }
}

impl FromStr for PrinterPolicy {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" | "defaultPrinter" => Ok(Self::DefaultPrinter),
            "required" => Ok(Self::Required),
            _ => Err(PrintError::invalid_option(
                "printer policy",
                s,
                Self::VALID,
            )),
        }
    }
}

impl TryFrom<String> for PrinterPolicy {
    type Error = PrintError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PrinterPolicy> for String {
    fn from(value: PrinterPolicy) -> Self {
        value.as_str().to_string()
    }
}

/// Complete configuration for one print job.
///
/// Every field is optional. JSON keys use camelCase, e.g.
/// `{"printer": "HP-LaserJet", "paperSize": "A4", "copies": 2}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PrintOptions {
    /// Name of the target printer.
    pub printer: Option<String>,

    /// Pages to print, e.g. `"1-3,5"`. Passed through unchanged.
    pub pages: Option<String>,

    /// Odd or even pages only.
    pub subset: Option<Subset>,

    /// Page orientation.
    pub orientation: Option<Orientation>,

    /// Scaling mode.
    pub scale: Option<Scale>,

    /// `Some(true)` prints monochrome, `Some(false)` forces color.
    pub monochrome: Option<bool>,

    /// Duplex mode.
    pub side: Option<Side>,

    /// Paper bin, passed through unchanged as `bin=<value>`.
    pub bin: Option<String>,

    /// Paper size, passed through unchanged as `paper=<value>`.
    pub paper_size: Option<String>,

    /// Number of copies. Zero means unset.
    pub copies: Option<u32>,

    /// `Some(false)` lets SumatraPDF show its own progress UI.
    pub silent: Option<bool>,

    /// Show the interactive print dialog instead of printing directly.
    pub print_dialog: bool,

    /// Location of the SumatraPDF executable, overriding the bundled one.
    #[serde(rename = "sumatraPdfPath")]
    pub sumatra_pdf_path: Option<PathBuf>,

    /// Behavior when no printer is named.
    pub printer_policy: PrinterPolicy,

    /// Run SumatraPDF through the system command interpreter.
    pub use_shell: bool,

    /// Upper bound on how long SumatraPDF may run, in milliseconds.
    pub timeout_ms: Option<u64>,

    /// Directory for temporary copies of in-memory PDFs.
    pub temp_dir: Option<PathBuf>,
}

impl PrintOptions {
    /// Create empty options: default printer, silent, no print settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::InvalidConfig`] for malformed input. When an
    /// enumerated field holds a value outside its allowed set, the message
    /// names every valid value.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfprint::config::{PrintOptions, Subset};
    ///
    /// let options = PrintOptions::from_json_str(r#"{"subset": "odd", "copies": 2}"#).unwrap();
    /// assert_eq!(options.subset, Some(Subset::Odd));
    /// assert_eq!(options.copies, Some(2));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|err| {
            PrintError::invalid_config(format!(
                "cannot read options file {}: {err}",
                path.display()
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// Check option combinations that the types alone cannot rule out.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the timeout is zero
    /// - the executable override is an empty path
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == Some(0) {
            return Err(PrintError::invalid_config("timeout must be at least 1ms"));
        }

        if let Some(path) = &self.sumatra_pdf_path
            && path.as_os_str().is_empty()
        {
            return Err(PrintError::invalid_config(
                "sumatraPdfPath must not be empty",
            ));
        }

        Ok(())
    }

    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// The printer name, if one was given and is not blank.
    pub fn printer_name(&self) -> Option<&str> {
        non_blank(self.printer.as_deref())
    }

    /// Whether SumatraPDF should run without its own UI.
    pub fn is_silent(&self) -> bool {
        self.silent != Some(false)
    }

    /// Overlay every field that is set in `other` onto `self`.
    ///
    /// Used by the command line, where flags override an options file.
    pub fn merge(mut self, other: PrintOptions) -> Self {
        overlay(&mut self.printer, other.printer);
        overlay(&mut self.pages, other.pages);
        overlay(&mut self.subset, other.subset);
        overlay(&mut self.orientation, other.orientation);
        overlay(&mut self.scale, other.scale);
        overlay(&mut self.monochrome, other.monochrome);
        overlay(&mut self.side, other.side);
        overlay(&mut self.bin, other.bin);
        overlay(&mut self.paper_size, other.paper_size);
        overlay(&mut self.copies, other.copies);
        overlay(&mut self.silent, other.silent);
        overlay(&mut self.sumatra_pdf_path, other.sumatra_pdf_path);
        overlay(&mut self.timeout_ms, other.timeout_ms);
        overlay(&mut self.temp_dir, other.temp_dir);
        self.print_dialog |= other.print_dialog;
        self.use_shell |= other.use_shell;
        if other.printer_policy != PrinterPolicy::default() {
            self.printer_policy = other.printer_policy;
        }
        self
    }

    /// Set the target printer.
    pub fn with_printer(mut self, printer: impl Into<String>) -> Self {
        self.printer = Some(printer.into());
        self
    }

    /// Set the pages to print.
    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    /// Restrict printing to odd or even pages.
    pub fn with_subset(mut self, subset: Subset) -> Self {
        self.subset = Some(subset);
        self
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Set the scaling mode.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Print monochrome (`true`) or force color (`false`).
    pub fn with_monochrome(mut self, monochrome: bool) -> Self {
        self.monochrome = Some(monochrome);
        self
    }

    /// Set the duplex mode.
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Set the paper bin.
    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin = Some(bin.into());
        self
    }

    /// Set the paper size.
    pub fn with_paper_size(mut self, paper_size: impl Into<String>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Set the number of copies.
    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = Some(copies);
        self
    }

    /// Toggle silent mode.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }

    /// Show the print dialog.
    pub fn with_print_dialog(mut self) -> Self {
        self.print_dialog = true;
        self
    }

    /// Use a specific SumatraPDF executable.
    pub fn with_sumatra_pdf_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sumatra_pdf_path = Some(path.into());
        self
    }

    /// Set the printer policy.
    pub fn with_printer_policy(mut self, policy: PrinterPolicy) -> Self {
        self.printer_policy = policy;
        self
    }

    /// Route the call through the system command interpreter.
    pub fn with_shell(mut self) -> Self {
        self.use_shell = true;
        self
    }

    /// Bound the run time of SumatraPDF.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_millis().clamp(1, u128::from(u64::MAX)) as u64;
        self.timeout_ms = Some(millis);
        self
    }

    /// Write temporary PDFs into `dir`.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }
}

fn overlay<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Treat empty and whitespace-only strings as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
