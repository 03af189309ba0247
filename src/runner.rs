//! Running the print executable.
//!
//! [`CommandRunner`] is the seam between the dispatcher and the operating
//! system. [`ProcessRunner`] spawns a real child process through
//! `tokio::process`; tests substitute a runner that records invocations.
//!
//! # Shell mode
//!
//! `cmd.exe` re-parses its whole command line, so shell mode on Windows does
//! not rely on the standard argument quoting. The command line is built by
//! [`Invocation::shell_command_line`] and passed verbatim:
//!
//! ```text
//! cmd /S /C ""C:\Program Files\SumatraPDF.exe" "-print-to" "HP & Co" "C:\docs\a.pdf""
//! ```
//!
//! Inside double quotes `cmd` takes `& | < > ^ ( )` literally. It still
//! expands `%` and `!` and toggles quoting on `"`, so values containing those
//! are refused with [`PrintError::UnsafeShellArgument`].

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::process::Command;

use crate::args::ArgumentList;
use crate::error::{PrintError, Result};

/// One fully resolved call of the print executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments, PDF path last.
    pub args: ArgumentList,
    /// Run through the system command interpreter.
    pub use_shell: bool,
    /// Upper bound on the run time.
    pub timeout: Option<Duration>,
}

impl Invocation {
    /// The program followed by its arguments, for display.
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.to_string_lossy().into_owned())
            .chain(self.args.display_lossy())
            .collect()
    }

    /// Check that the invocation can run as configured.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::UnsafeShellArgument`] in shell mode when a value
    /// cannot be passed through `cmd.exe` unchanged.
    pub fn validate(&self) -> Result<()> {
        if self.use_shell {
            self.shell_command_line()?;
        }
        Ok(())
    }

    /// The raw argument string handed to `cmd.exe` in shell mode.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::UnsafeShellArgument`] for a value containing
    /// `"`, `%`, `!`, a control character, or invalid Unicode.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfprint::args::ArgumentList;
    /// use pdfprint::runner::Invocation;
    /// use std::path::PathBuf;
    ///
    /// let mut args = ArgumentList::default();
    /// args.push("-print-to");
    /// args.push("HP & Co");
    /// let invocation = Invocation {
    ///     program: PathBuf::from("SumatraPDF.exe"),
    ///     args,
    ///     use_shell: true,
    ///     timeout: None,
    /// };
    ///
    /// assert_eq!(
    ///     invocation.shell_command_line().unwrap(),
    ///     r#"/S /C ""SumatraPDF.exe" "-print-to" "HP & Co"""#
    /// );
    /// ```
    pub fn shell_command_line(&self) -> Result<String> {
        let mut line = String::from("/S /C \"");
        line.push_str(&quote_for_cmd(self.program.as_os_str())?);
        for arg in self.args.as_slice() {
            line.push(' ');
            line.push_str(&quote_for_cmd(arg)?);
        }
        line.push('"');
        Ok(line)
    }

    fn command(&self) -> Result<Command> {
        if self.use_shell {
            return shell_command(self);
        }

        let mut command = Command::new(&self.program);
        command.args(self.args.as_slice());
        Ok(command)
    }
}

/// Wrap one value in double quotes for `cmd /S /C`.
fn quote_for_cmd(value: &OsStr) -> Result<String> {
    let refuse = |reason: &'static str| PrintError::UnsafeShellArgument {
        argument: value.to_string_lossy().into_owned(),
        reason,
    };

    let text = value.to_str().ok_or_else(|| refuse("is not valid Unicode"))?;
    if let Some(reason) = text.chars().find_map(|c| match c {
        '"' => Some("contains a double quote"),
        '%' => Some("contains %"),
        '!' => Some("contains !"),
        c if c.is_control() => Some("contains a control character"),
        _ => None,
    }) {
        return Err(refuse(reason));
    }

    // A trailing backslash would escape the closing quote for the callee.
    let trailing = text.len() - text.trim_end_matches('\\').len();
    Ok(format!("\"{text}{}\"", "\\".repeat(trailing)))
}

#[cfg(windows)]
fn shell_command(invocation: &Invocation) -> Result<Command> {
    use std::os::windows::process::CommandExt;

    let mut command = std::process::Command::new("cmd");
    command.raw_arg(invocation.shell_command_line()?);
    Ok(Command::from(command))
}

/// Off Windows the interpreter is `sh`, which receives the program and its
/// arguments as positional parameters. The `cmd.exe` rules still apply so a
/// job behaves the same wherever it is planned.
#[cfg(not(windows))]
fn shell_command(invocation: &Invocation) -> Result<Command> {
    invocation.shell_command_line()?;

    let mut command = Command::new("sh");
    command
        .arg("-c")
        .arg("\"$0\" \"$@\"")
        .arg(&invocation.program)
        .args(invocation.args.as_slice());
    Ok(command)
}

/// Executes an [`Invocation`] to completion.
pub trait CommandRunner: Send + Sync {
    /// Run the invocation and wait for it to finish.
    ///
    /// # Errors
    ///
    /// - [`PrintError::UnsafeShellArgument`] if shell mode cannot carry a value
    /// - [`PrintError::SpawnFailed`] if the process cannot be started
    /// - [`PrintError::ProcessFailed`] if it exits unsuccessfully
    /// - [`PrintError::TimedOut`] if it outlives `invocation.timeout`
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<()>>;
}

/// Spawns the print executable as a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a runner.
    pub fn new() -> Self {
        Self
    }

    async fn run_to_completion(invocation: &Invocation) -> Result<()> {
        let mut command = invocation.command()?;
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| PrintError::SpawnFailed {
            program: invocation.program.clone(),
            source,
        })?;

        let output = match invocation.timeout {
            Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
                .await
                .map_err(|_| PrintError::TimedOut {
                    program: invocation.program.clone(),
                    timeout,
                })?,
            None => child.wait_with_output().await,
        }?;

        if output.status.success() {
            tracing::debug!(program = %invocation.program.display(), "print executable finished");
            Ok(())
        } else {
            Err(PrintError::ProcessFailed {
                program: invocation.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, Result<()>> {
        Box::pin(Self::run_to_completion(invocation))
    }
}
