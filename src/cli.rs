//! CLI argument parsing for pdfprint.
//!
//! This module defines the command-line interface using `clap`. Every
//! [`PrintOptions`] field has a flag; flags override values loaded with
//! `--options-file`.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use pdfprint::cli::Cli;
//!
//! let cli = Cli::parse();
//! let options = cli.to_options().expect("invalid options");
//! println!("Printing {} to {:?}", cli.pdf.display(), options.printer);
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncReadExt;

use crate::config::{Orientation, PrintOptions, PrinterPolicy, Scale, Side, Subset};
use crate::error::{PrintError, Result};
use crate::source::PdfSource;

/// Argument that reads the PDF from stdin.
pub const STDIN_ARG: &str = "-";

/// Print a PDF file on Windows through SumatraPDF.
///
/// Without a printer name the document goes to the system default printer.
/// Print settings are passed to SumatraPDF as a single `-print-settings`
/// argument.
#[derive(Parser, Debug)]
#[command(name = "pdfprint")]
#[command(version)]
#[command(about = "Print a PDF file on Windows through SumatraPDF", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// PDF file to print, or '-' to read the document from stdin
    #[arg(value_name = "PDF")]
    pub pdf: PathBuf,

    /// Name of the printer to use
    ///
    /// Defaults to the system default printer.
    #[arg(short, long, value_name = "NAME")]
    pub printer: Option<String>,

    /// Show the interactive print dialog instead of printing directly
    #[arg(long, conflicts_with = "printer")]
    pub print_dialog: bool,

    /// Pages to print, e.g. "1-3,5"
    #[arg(long, value_name = "RANGE")]
    pub pages: Option<String>,

    /// Print only odd or even pages
    #[arg(long, value_name = "SUBSET")]
    pub subset: Option<String>,

    /// Page orientation
    #[arg(long, value_name = "ORIENTATION")]
    pub orientation: Option<String>,

    /// Scaling mode
    #[arg(long, value_name = "SCALE")]
    pub scale: Option<String>,

    /// Print in monochrome
    #[arg(long)]
    pub monochrome: bool,

    /// Force color printing
    #[arg(long, conflicts_with = "monochrome")]
    pub color: bool,

    /// Duplex mode
    #[arg(long, value_name = "SIDE")]
    pub side: Option<String>,

    /// Paper bin, by number or name
    #[arg(long, value_name = "BIN")]
    pub bin: Option<String>,

    /// Paper size, e.g. "A4" or "letter"
    #[arg(long, value_name = "SIZE")]
    pub paper_size: Option<String>,

    /// Number of copies
    #[arg(short = 'n', long, value_name = "N")]
    pub copies: Option<u32>,

    /// Let SumatraPDF show its progress window
    #[arg(long)]
    pub no_silent: bool,

    /// Path to the SumatraPDF executable
    #[arg(long, value_name = "FILE")]
    pub sumatra_path: Option<PathBuf>,

    /// Fail instead of falling back to the default printer
    #[arg(long, conflicts_with = "print_dialog")]
    pub require_printer: bool,

    /// Run SumatraPDF through the system command interpreter
    #[arg(long)]
    pub shell: bool,

    /// Kill SumatraPDF if it runs longer than this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Directory for the temporary copy of a PDF read from stdin
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Load options from a JSON file; flags take precedence
    ///
    /// Keys use camelCase, e.g. {"printer": "HP", "paperSize": "A4"}.
    #[arg(long, value_name = "FILE")]
    pub options_file: Option<PathBuf>,

    /// Show the command that would run without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output, including debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Build the job's [`PrintOptions`].
    ///
    /// Options from `--options-file` are loaded first; every flag given on
    /// the command line then overrides the matching field.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the options file cannot be read or parsed
    /// - an enumerated flag holds a value outside its allowed set
    /// - the merged options fail validation
    pub fn to_options(&self) -> Result<PrintOptions> {
        let base = match &self.options_file {
            Some(path) => PrintOptions::from_json_file(path)?,
            None => PrintOptions::new(),
        };

        let flags = PrintOptions {
            printer: self.printer.clone(),
            pages: self.pages.clone(),
            subset: parse_optional::<Subset>(self.subset.as_deref())?,
            orientation: parse_optional::<Orientation>(self.orientation.as_deref())?,
            scale: parse_optional::<Scale>(self.scale.as_deref())?,
            monochrome: match (self.monochrome, self.color) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            side: parse_optional::<Side>(self.side.as_deref())?,
            bin: self.bin.clone(),
            paper_size: self.paper_size.clone(),
            copies: self.copies,
            silent: self.no_silent.then_some(false),
            print_dialog: self.print_dialog,
            sumatra_pdf_path: self.sumatra_path.clone(),
            printer_policy: if self.require_printer {
                PrinterPolicy::Required
            } else {
                PrinterPolicy::default()
            },
            use_shell: self.shell,
            timeout_ms: self.timeout_ms,
            temp_dir: self.temp_dir.clone(),
        };

        let options = base.merge(flags);
        options.validate()?;
        Ok(options)
    }

    /// Validate argument combinations clap cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the PDF argument is empty
    /// - `--dry-run` is combined with stdin input
    pub fn validate(&self) -> Result<()> {
        if self.pdf.as_os_str().is_empty() {
            return Err(PrintError::NoPdfSpecified);
        }

        if self.dry_run && self.reads_stdin() {
            return Err(PrintError::invalid_config(
                "--dry-run needs a file path, not stdin",
            ));
        }

        Ok(())
    }

    /// Whether the document comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.pdf.as_os_str() == STDIN_ARG
    }

    /// The document to print: the path argument, or the bytes on stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read.
    pub async fn source(&self) -> Result<PdfSource> {
        if self.reads_stdin() {
            Ok(PdfSource::Bytes(read_stdin().await?))
        } else {
            Ok(PdfSource::Path(self.pdf.clone()))
        }
    }

    /// Path argument, for display.
    pub fn pdf_display(&self) -> String {
        if self.reads_stdin() {
            "<stdin>".to_string()
        } else {
            self.pdf.display().to_string()
        }
    }
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = PrintError>,
{
    value.map(T::from_str).transpose()
}

async fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut bytes)
        .await
        .context("failed to read PDF from stdin")?;
    Ok(bytes)
}
