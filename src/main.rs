//! pdfprint - Print PDF files on Windows through SumatraPDF.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use pdfprint::Printer;
use pdfprint::cli::Cli;
use pdfprint::error::PrintError;
use pdfprint::output::{
    OutputFormatter, Verbosity, display_invocation, display_options, warn_ignored_options,
};
use pdfprint::source::PdfSource;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Log to stderr. `RUST_LOG` wins over the `-v` default.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PrintError> {
    cli.validate()?;
    let options = cli.to_options()?;

    let formatter = OutputFormatter::new(Verbosity::from_flags(cli.quiet, cli.verbose));

    formatter.section(&format!("{} v{}", pdfprint::NAME, pdfprint::VERSION));
    if let Some(path) = &cli.options_file {
        formatter.debug(&format!("Loaded options from {}", path.display()));
    }
    display_options(&formatter, &options);
    warn_ignored_options(&formatter, &options);

    let printer = Printer::new();

    if cli.dry_run {
        let invocation = printer.plan(&cli.pdf, &options)?;
        formatter.status("Dry run: nothing will be printed");
        formatter.blank_line();
        display_invocation(&formatter, &invocation);
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        return Ok(());
    }

    let source = cli.source().await?;
    if let PdfSource::Bytes(bytes) = &source {
        formatter.debug(&format!("Read {} bytes from stdin", bytes.len()));
    }
    formatter.status(&format!("Printing {}...", cli.pdf_display()));

    printer.print(source, &options).await?;

    formatter.success("Print job sent");
    Ok(())
}
