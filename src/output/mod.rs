//! User-facing output for the `pdfprint` binary.
//!
//! Diagnostics go through `tracing`; this module only prints what the user
//! asked to see: status lines, notices about ignored options and dry-run
//! previews.
//!
//! # Examples
//!
//! ```no_run
//! use pdfprint::output::{OutputFormatter, Verbosity};
//!
//! let formatter = OutputFormatter::new(Verbosity::Verbose);
//! formatter.status("Printing report.pdf");
//! formatter.success("Print job sent");
//! ```

pub mod formatter;

pub use formatter::{OutputFormatter, Verbosity};

use crate::config::{PrintOptions, PrinterPolicy};
use crate::runner::Invocation;

/// Display the command a print job would run.
///
/// # Arguments
///
/// * `formatter` - Output formatter to use
/// * `invocation` - Resolved invocation
pub fn display_invocation(formatter: &OutputFormatter, invocation: &Invocation) {
    formatter.status(&format!("Executable: {}", invocation.program.display()));
    formatter.status("Arguments:");
    for (index, arg) in invocation.args.display_lossy().iter().enumerate() {
        formatter.argument(index, arg);
    }

    if invocation.use_shell
        && let Ok(line) = invocation.shell_command_line()
    {
        formatter.detail("Shell", &format!("cmd {line}"));
    }
    if let Some(timeout) = invocation.timeout {
        formatter.detail("Timeout", &format!("{:.2}s", timeout.as_secs_f64()));
    }
}

/// Display the printer, silence, copy count and temp dir in verbose mode.
pub fn display_options(formatter: &OutputFormatter, options: &PrintOptions) {
    if !formatter.is_verbose() {
        return;
    }

    let printer = if options.print_dialog {
        "(print dialog)".to_string()
    } else {
        options
            .printer_name()
            .map_or_else(|| "(default printer)".to_string(), str::to_string)
    };

    formatter.section("Options");
    formatter.detail("Printer", &printer);
    formatter.detail("Silent", if options.is_silent() { "yes" } else { "no" });
    if let Some(copies) = options.copies {
        formatter.detail("Copies", &copies.to_string());
    }
    if let Some(dir) = &options.temp_dir {
        formatter.detail("Temp dir", &dir.display().to_string());
    }
}

/// Options that are set but have no effect on the job.
///
/// The print dialog replaces printer selection, so a printer name, the
/// required-printer policy and a non-silent request are all dropped with it.
pub fn ignored_options(options: &PrintOptions) -> Vec<String> {
    let mut notices = Vec::new();
    if !options.print_dialog {
        return notices;
    }

    if let Some(printer) = options.printer_name() {
        notices.push(format!(
            "Printer \"{printer}\" is ignored when the print dialog is shown"
        ));
    }
    if options.printer_policy == PrinterPolicy::Required {
        notices.push("The required-printer policy has no effect with the print dialog".to_string());
    }
    if options.silent == Some(false) {
        notices.push("--no-silent has no effect with the print dialog".to_string());
    }
    notices
}

/// Warn about every option [`ignored_options`] reports.
pub fn warn_ignored_options(formatter: &OutputFormatter, options: &PrintOptions) {
    for notice in ignored_options(options) {
        formatter.warning(&notice);
    }
}
