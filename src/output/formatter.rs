//! Terminal output for the `pdfprint` binary.
//!
//! Status lines go to stdout and warnings to stderr. How much is shown
//! depends on the [`Verbosity`] picked on the command line.
//!
//! # Examples
//!
//! ```
//! use pdfprint::output::formatter::{OutputFormatter, Verbosity};
//!
//! let formatter = OutputFormatter::new(Verbosity::from_flags(false, true));
//! formatter.status("Printing report.pdf...");
//! formatter.detail("Printer", "HP-LaserJet");
//! formatter.success("Print job sent");
//! ```

use std::io::{self, IsTerminal};

/// How chatty the binary is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Warnings only.
    Quiet,
    /// Status lines and results.
    #[default]
    Normal,
    /// Everything, including option details and debug notes.
    Verbose,
}

impl Verbosity {
    /// Map the `--quiet` / `--verbose` flags. Quiet wins if both are set.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Success,
    Warning,
    Note,
}

impl Tone {
    fn marker(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Note => "→ ",
        }
    }

    fn color(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Success => Some("\x1b[32m"),
            Self::Warning => Some("\x1b[33m"),
            Self::Note => Some("\x1b[36m"),
        }
    }
}

/// Prints status for one print job.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    verbosity: Verbosity,
    colored: bool,
}

impl OutputFormatter {
    /// Create a formatter. Colors are used when stdout is a terminal and
    /// `TERM` is set.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            colored: io::stdout().is_terminal() && std::env::var_os("TERM").is_some(),
        }
    }

    /// Never emit ANSI colors.
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// The configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether option details and debug notes are shown.
    pub fn is_verbose(&self) -> bool {
        self.shows(Verbosity::Verbose)
    }

    /// A progress line, e.g. "Printing report.pdf...".
    pub fn status(&self, message: &str) {
        if self.shows(Verbosity::Normal) {
            println!("{}", self.render(Tone::Plain, message));
        }
    }

    /// The final result of a job.
    pub fn success(&self, message: &str) {
        if self.shows(Verbosity::Normal) {
            println!("{}", self.render(Tone::Success, message));
        }
    }

    /// Something the user asked for that will not happen. Printed to stderr
    /// at every verbosity.
    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.render(Tone::Warning, message));
    }

    /// A note for verbose mode only.
    pub fn debug(&self, message: &str) {
        if self.is_verbose() {
            println!("{}", self.render(Tone::Note, message));
        }
    }

    /// A heading, verbose mode only.
    pub fn section(&self, title: &str) {
        if self.is_verbose() {
            println!("\n{title}");
        }
    }

    /// A labelled value, verbose mode only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.is_verbose() {
            println!("  {label}: {value}");
        }
    }

    /// One numbered argument of a command line.
    pub fn argument(&self, index: usize, value: &str) {
        if self.shows(Verbosity::Normal) {
            println!("  [{index}] {value}");
        }
    }

    /// A blank line, unless quiet.
    pub fn blank_line(&self) {
        if self.shows(Verbosity::Normal) {
            println!();
        }
    }

    fn shows(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }

    fn render(&self, tone: Tone, message: &str) -> String {
        let marker = tone.marker();
        match tone.color() {
            Some(color) if self.colored => format!("{color}{marker}{message}\x1b[0m"),
            _ => format!("{marker}{message}"),
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}
