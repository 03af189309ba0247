//! Printing files that already exist on disk.

use pdfprint::config::{Orientation, PrintOptions, PrinterPolicy, Scale, Side, Subset};
use pdfprint::error::PrintError;

use crate::common::{MINIMAL_PDF, TestEnv};

#[tokio::test]
async fn test_print_named_printer_copies_monochrome() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);

    let options = PrintOptions::new()
        .with_printer("HP-LaserJet")
        .with_copies(2)
        .with_monochrome(true);
    env.printer().print(pdf.as_path(), &options).await.unwrap();

    let calls = env.runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].invocation.program, env.exe);
    assert_eq!(
        calls[0].args(),
        [
            "-print-to".to_string(),
            "HP-LaserJet".to_string(),
            "-silent".to_string(),
            "-print-settings".to_string(),
            "monochrome,2x".to_string(),
            pdf.display().to_string(),
        ]
    );
    assert!(pdf.exists(), "caller-owned file must not be removed");
}

#[tokio::test]
async fn test_print_default_printer() {
    let env = TestEnv::new();
    let pdf = env.write_file("plain.pdf", MINIMAL_PDF);

    env.printer()
        .print(pdf.as_path(), &PrintOptions::new())
        .await
        .unwrap();

    assert_eq!(
        env.runner.calls()[0].args(),
        [
            "-print-to-default".to_string(),
            "-silent".to_string(),
            pdf.display().to_string(),
        ]
    );
}

#[tokio::test]
async fn test_print_dialog_has_no_silent_flag() {
    let env = TestEnv::new();
    let pdf = env.write_file("dialog.pdf", MINIMAL_PDF);

    let options = PrintOptions::new()
        .with_print_dialog()
        .with_printer_policy(PrinterPolicy::Required)
        .with_pages("1-2");
    env.printer().print(pdf.as_path(), &options).await.unwrap();

    assert_eq!(
        env.runner.calls()[0].args(),
        [
            "-print-dialog".to_string(),
            "-print-settings".to_string(),
            "1-2".to_string(),
            pdf.display().to_string(),
        ]
    );
}

#[tokio::test]
async fn test_print_every_setting_in_order() {
    let env = TestEnv::new();
    let pdf = env.write_file("full.pdf", MINIMAL_PDF);

    let options = PrintOptions::new()
        .with_printer("Office Printer \"2nd floor\"")
        .with_pages("1-3,5")
        .with_subset(Subset::Even)
        .with_orientation(Orientation::Portrait)
        .with_scale(Scale::Shrink)
        .with_monochrome(false)
        .with_side(Side::DuplexShort)
        .with_bin("2")
        .with_paper_size("A4")
        .with_copies(3)
        .with_silent(false);
    env.printer().print(pdf.as_path(), &options).await.unwrap();

    assert_eq!(
        env.runner.calls()[0].args(),
        [
            "-print-to".to_string(),
            "Office Printer \"2nd floor\"".to_string(),
            "-print-settings".to_string(),
            "1-3,5,even,portrait,shrink,color,duplexshort,bin=2,paper=A4,3x".to_string(),
            pdf.display().to_string(),
        ]
    );
}

#[tokio::test]
async fn test_print_options_from_json() {
    let env = TestEnv::new();
    let pdf = env.write_file("json.pdf", MINIMAL_PDF);

    let options = PrintOptions::from_json_str(
        r#"{"printer": "HP-LaserJet", "scale": "fit", "paperSize": "letter", "copies": 0}"#,
    )
    .unwrap();
    env.printer().print(pdf.as_path(), &options).await.unwrap();

    assert_eq!(
        env.runner.calls()[0].args(),
        [
            "-print-to".to_string(),
            "HP-LaserJet".to_string(),
            "-silent".to_string(),
            "-print-settings".to_string(),
            "fit,paper=letter".to_string(),
            pdf.display().to_string(),
        ]
    );
}

#[tokio::test]
async fn test_executable_override_replaces_locator() {
    let env = TestEnv::new();
    let pdf = env.write_file("override.pdf", MINIMAL_PDF);
    let other = env.write_file("SumatraPDF-portable.exe", b"");

    let options = PrintOptions::new().with_sumatra_pdf_path(&other);
    env.printer().print(pdf.as_path(), &options).await.unwrap();

    assert_eq!(env.runner.calls()[0].invocation.program, other);
}

#[test]
fn test_plan_matches_print() {
    let env = TestEnv::new();
    let pdf = env.write_file("plan.pdf", MINIMAL_PDF);

    let options = PrintOptions::new()
        .with_printer("HP-LaserJet")
        .with_shell()
        .with_timeout(std::time::Duration::from_secs(30));
    let invocation = env.printer().plan(&pdf, &options).unwrap();

    assert!(invocation.use_shell);
    assert_eq!(invocation.timeout, Some(std::time::Duration::from_secs(30)));
    assert_eq!(
        invocation.command_line(),
        [
            env.exe.display().to_string(),
            "-print-to".to_string(),
            "HP-LaserJet".to_string(),
            "-silent".to_string(),
            pdf.display().to_string(),
        ]
    );
    assert!(env.runner.calls().is_empty());
}

#[tokio::test]
async fn test_print_path_through_shell_keeps_printer_name_whole() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);

    let options = PrintOptions::new().with_printer("HP & Co").with_shell();
    env.printer().print(pdf.as_path(), &options).await.unwrap();

    let calls = env.runner.calls();
    assert!(calls[0].invocation.use_shell);
    assert_eq!(calls[0].args()[..2], ["-print-to", "HP & Co"]);

    let line = calls[0].invocation.shell_command_line().unwrap();
    assert!(line.starts_with("/S /C \""));
    assert!(line.contains(r#" "-print-to" "HP & Co" "#));
}

#[tokio::test]
async fn test_print_path_through_shell_refuses_percent_printer() {
    let env = TestEnv::new();
    let pdf = env.write_file("report.pdf", MINIMAL_PDF);

    let options = PrintOptions::new().with_printer("HP%USERNAME%").with_shell();
    let err = env
        .printer()
        .print(pdf.as_path(), &options)
        .await
        .unwrap_err();

    assert!(matches!(err, PrintError::UnsafeShellArgument { .. }));
    assert!(env.runner.calls().is_empty());
}
