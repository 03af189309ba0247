//! The print dispatcher.
//!
//! [`Printer::print`] runs one job from start to finish:
//!
//! 1. refuse to run anywhere but Windows
//! 2. find the SumatraPDF executable
//! 3. build the argument list, validating the printer policy
//! 4. resolve the PDF source, writing a temporary file for buffers
//! 5. run SumatraPDF and wait for it
//! 6. remove the temporary file, whatever happened in step 5
//!
//! # Examples
//!
//! ```no_run
//! use pdfprint::Printer;
//! use pdfprint::config::{Orientation, PrintOptions, Subset};
//!
//! # async fn example() -> pdfprint::Result<()> {
//! let options = PrintOptions::new()
//!     .with_printer("HP-LaserJet")
//!     .with_subset(Subset::Odd)
//!     .with_orientation(Orientation::Landscape);
//!
//! Printer::new().print("C:/docs/report.pdf", &options).await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::args::ArgumentList;
use crate::config::PrintOptions;
use crate::error::Result;
use crate::locator::{BundledLocator, ExecutableLocator, FixedLocator};
use crate::platform::Platform;
use crate::runner::{CommandRunner, Invocation, ProcessRunner};
use crate::source::{PdfSource, ResolvedSource};

/// Dispatches print jobs to SumatraPDF.
///
/// A `Printer` holds no per-job state; one instance can serve any number of
/// concurrent jobs.
#[derive(Clone)]
pub struct Printer {
    locator: Arc<dyn ExecutableLocator>,
    runner: Arc<dyn CommandRunner>,
    platform: Platform,
    temp_dir: Option<PathBuf>,
}

impl Printer {
    /// Create a printer that uses the bundled SumatraPDF and spawns it as a
    /// child process.
    pub fn new() -> Self {
        Self {
            locator: Arc::new(BundledLocator::new()),
            runner: Arc::new(ProcessRunner::new()),
            platform: Platform::current(),
            temp_dir: None,
        }
    }

    /// Use a custom executable locator.
    pub fn with_locator(mut self, locator: impl ExecutableLocator + 'static) -> Self {
        self.locator = Arc::new(locator);
        self
    }

    /// Use a custom command runner.
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Arc::new(runner);
        self
    }

    /// Override the detected platform.
    ///
    /// Meant for runners that forward the call to a Windows host, e.g. over
    /// Wine or a remote agent.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Default directory for temporary PDFs, used when the job's options do
    /// not name one.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Print `source` with `options`.
    ///
    /// # Errors
    ///
    /// Every [`PrintError`](crate::PrintError) variant except `InvalidOption`,
    /// which can only arise while parsing options. Validation and environment
    /// errors are returned before anything is written or spawned.
    pub async fn print(&self, source: impl Into<PdfSource>, options: &PrintOptions) -> Result<()> {
        let (program, args) = self.prepare(options)?;
        let source = ResolvedSource::resolve(source.into(), &self.temp_dir_for(options)).await?;

        let invocation = Invocation {
            program,
            args: args.with_pdf(source.path()),
            use_shell: options.use_shell,
            timeout: options.timeout(),
        };

        tracing::info!(
            program = %invocation.program.display(),
            pdf = %source.path().display(),
            temporary = source.is_temporary(),
            "dispatching print job"
        );
        tracing::debug!(args = ?invocation.args.display_lossy(), "print arguments");

        let outcome = match invocation.validate() {
            Ok(()) => self.runner.run(&invocation).await,
            Err(err) => Err(err),
        };
        source.cleanup();
        outcome
    }

    /// Resolve everything [`Printer::print`] would run for a file on disk,
    /// without running it.
    ///
    /// # Errors
    ///
    /// The same validation and environment errors as [`Printer::print`].
    pub fn plan(&self, pdf: &Path, options: &PrintOptions) -> Result<Invocation> {
        let (program, args) = self.prepare(options)?;
        let source = ResolvedSource::from_path(pdf)?;

        let invocation = Invocation {
            program,
            args: args.with_pdf(source.path()),
            use_shell: options.use_shell,
            timeout: options.timeout(),
        };
        invocation.validate()?;
        Ok(invocation)
    }

    /// Platform check, executable lookup and argument construction, in that
    /// order. Shell-mode arguments are checked here too, before any temporary
    /// file exists.
    fn prepare(&self, options: &PrintOptions) -> Result<(PathBuf, ArgumentList)> {
        self.platform.ensure_supported()?;
        options.validate()?;

        let program = match &options.sumatra_pdf_path {
            Some(path) => FixedLocator::new(path).locate()?,
            None => self.locator.locate()?,
        };
        tracing::debug!(program = %program.display(), "resolved print executable");

        let args = ArgumentList::from_options(options)?;
        let draft = Invocation {
            program,
            args,
            use_shell: options.use_shell,
            timeout: None,
        };
        draft.validate()?;
        Ok((draft.program, draft.args))
    }

    fn temp_dir_for(&self, options: &PrintOptions) -> PathBuf {
        options
            .temp_dir
            .clone()
            .or_else(|| self.temp_dir.clone())
            .unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("platform", &self.platform)
            .field("temp_dir", &self.temp_dir)
            .finish_non_exhaustive()
    }
}
