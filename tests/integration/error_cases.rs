//! Integration tests for error handling and edge cases.

use clap::Parser;
use pdfprint::cli::Cli;
use pdfprint::config::{PrintOptions, PrinterPolicy};
use pdfprint::error::{ErrorCategory, PrintError};
use pdfprint::platform::Platform;

use crate::common::{MINIMAL_PDF, TestEnv};

#[tokio::test]
async fn test_error_missing_file() {
    let env = TestEnv::new();
    let missing = env.dir.path().join("missing.pdf");

    let err = env
        .printer()
        .print(missing.as_path(), &PrintOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PrintError::FileNotFound { .. }));
    assert!(err.to_string().starts_with("No such file"));
    assert!(env.runner.calls().is_empty());
}

#[tokio::test]
async fn test_error_empty_path() {
    let env = TestEnv::new();

    let err = env
        .printer()
        .print("", &PrintOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No PDF specified");
    assert!(env.runner.calls().is_empty());
}

#[tokio::test]
async fn test_error_buffer_not_a_pdf() {
    let env = TestEnv::new();

    let err = env
        .printer()
        .print(b"<html></html>".to_vec(), &PrintOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "File has to be a PDF");
    assert!(env.runner.calls().is_empty());
    assert!(env.leftover_temp_files().is_empty());
}

#[tokio::test]
async fn test_error_printer_required() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);

    let options = PrintOptions::new()
        .with_printer("   ")
        .with_printer_policy(PrinterPolicy::Required);
    let err = env
        .printer()
        .print(pdf.as_path(), &options)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Printer name required");
    assert!(env.runner.calls().is_empty());
}

#[tokio::test]
async fn test_error_unsupported_platform() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);

    let err = env
        .printer()
        .with_platform(Platform::Other("macos"))
        .print(pdf.as_path(), &PrintOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Environment);
    assert!(env.runner.calls().is_empty());
}

#[tokio::test]
async fn test_error_missing_executable_override() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);

    let options = PrintOptions::new().with_sumatra_pdf_path(env.dir.path().join("gone.exe"));
    let err = env
        .printer()
        .print(pdf.as_path(), &options)
        .await
        .unwrap_err();

    assert!(matches!(err, PrintError::ExecutableNotFound { .. }));
    assert!(env.runner.calls().is_empty());
}

/// Parse a command line and print whatever it resolves to.
async fn print_from_args(env: &TestEnv, args: &[&str]) -> pdfprint::Result<()> {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.validate()?;
    let options = cli.to_options()?;
    env.printer().print(cli.source().await?, &options).await
}

#[tokio::test]
async fn test_error_invalid_scale_flag_never_reaches_runner() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);
    let pdf = pdf.to_str().unwrap();

    let err = print_from_args(&env, &["pdfprint", "--scale", "stretch", pdf])
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid scale provided. Valid names: noscale, shrink, fit"
    );
    assert!(env.runner.calls().is_empty());
}

#[tokio::test]
async fn test_error_invalid_side_in_options_file_never_reaches_runner() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);
    let options = env.write_file("options.json", br#"{"side": "triplex"}"#);

    let err = print_from_args(
        &env,
        &[
            "pdfprint",
            "--options-file",
            options.to_str().unwrap(),
            pdf.to_str().unwrap(),
        ],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PrintError::InvalidConfig { .. }));
    assert!(err.to_string().contains("duplex, duplexshort, duplexlong, simplex"));
    assert!(env.runner.calls().is_empty());
}

#[tokio::test]
async fn test_valid_flags_do_reach_runner() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);

    print_from_args(&env, &["pdfprint", "--scale", "fit", pdf.to_str().unwrap()])
        .await
        .unwrap();

    assert_eq!(env.runner.calls().len(), 1);
}

#[test]
fn test_error_exit_codes_are_distinct_per_category() {
    let validation = PrintError::NotAPdf.exit_code();
    let environment = PrintError::unsupported_platform("linux").exit_code();
    let timed_out = PrintError::TimedOut {
        program: "SumatraPDF.exe".into(),
        timeout: std::time::Duration::from_secs(1),
    }
    .exit_code();

    assert_ne!(validation, environment);
    assert_ne!(environment, timed_out);
    assert_ne!(validation, 0);
}
