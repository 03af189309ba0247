//! Shared fixtures for the integration tests.
//!
//! Tests never spawn SumatraPDF. They point the printer at an empty stand-in
//! executable and swap the process runner for [`RecordingRunner`].

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use pdfprint::Printer;
use pdfprint::error::{PrintError, Result};
use pdfprint::locator::FixedLocator;
use pdfprint::platform::Platform;
use pdfprint::runner::{CommandRunner, Invocation};

/// Smallest byte string that passes the PDF signature check.
pub const MINIMAL_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF\n";

/// One call seen by [`RecordingRunner`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// What the printer asked to run.
    pub invocation: Invocation,
    /// Whether the final argument existed on disk during the call.
    pub pdf_existed: bool,
}

impl RecordedCall {
    /// Arguments as strings.
    pub fn args(&self) -> Vec<String> {
        self.invocation.args.display_lossy()
    }

    /// The final argument, which is always the PDF path.
    pub fn pdf(&self) -> PathBuf {
        PathBuf::from(self.args().last().cloned().unwrap_or_default())
    }
}

/// Records invocations instead of spawning processes.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    exit_code: Option<i32>,
}

impl RecordingRunner {
    /// A runner whose every call fails like a process exiting with `code`.
    pub fn failing(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::default()
        }
    }

    /// Every call so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let pdf_existed = invocation
                .args
                .as_slice()
                .last()
                .is_some_and(|pdf| Path::new(pdf).exists());
            self.calls.lock().unwrap().push(RecordedCall {
                invocation: invocation.clone(),
                pdf_existed,
            });

            match self.exit_code {
                None => Ok(()),
                Some(code) => Err(PrintError::ProcessFailed {
                    program: invocation.program.clone(),
                    code: Some(code),
                    stderr: "printer offline".to_string(),
                }),
            }
        })
    }
}

/// A scratch directory holding a stand-in SumatraPDF executable.
pub struct TestEnv {
    /// Scratch directory; also used for temporary PDFs.
    pub dir: tempfile::TempDir,
    /// Stand-in executable.
    pub exe: PathBuf,
    /// Runner handed to every printer built by [`TestEnv::printer`].
    pub runner: RecordingRunner,
}

impl TestEnv {
    /// Create an environment whose printer succeeds.
    pub fn new() -> Self {
        Self::with_runner(RecordingRunner::default())
    }

    /// Create an environment with a specific runner.
    pub fn with_runner(runner: RecordingRunner) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let exe = dir.path().join("SumatraPDF-3.4.6-32.exe");
        std::fs::write(&exe, b"").expect("Failed to create stand-in executable");
        Self { dir, exe, runner }
    }

    /// A printer wired to this environment, pretending to run on Windows.
    pub fn printer(&self) -> Printer {
        Printer::new()
            .with_platform(Platform::Windows)
            .with_locator(FixedLocator::new(&self.exe))
            .with_runner(self.runner.clone())
            .with_temp_dir(self.temp_dir())
    }

    /// Directory that receives temporary PDFs. Created on first use.
    pub fn temp_dir(&self) -> PathBuf {
        let dir = self.dir.path().join("tmp");
        std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir
    }

    /// Write `bytes` to `name` inside the scratch directory.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).expect("Failed to write fixture");
        path
    }

    /// Files left in the temporary PDF directory.
    pub fn leftover_temp_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.temp_dir())
            .expect("Failed to read temp dir")
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect()
    }
}

/// True when `path` has a `.pdf` extension.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "pdf")
}
