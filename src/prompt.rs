// ABOUTME: Confirmation prompt shown before the remote command runs
// ABOUTME: Reads one line from any BufRead so tests and --yes can substitute their own answer

use anyhow::{Context, Result};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

pub trait Confirm {
    /// Show `message` and wait for the user. `false` means no answer came.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

impl<T: Confirm + ?Sized> Confirm for Box<T> {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        (**self).confirm(message)
    }
}

/// Any line, empty included, confirms. End of input declines.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        write!(self.output, "{message}\n--> ")?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;

        Ok(read > 0)
    }
}

/// Used for `--yes`; never touches stdin.
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        tracing::debug!("Confirmation skipped: {}", message.trim());
        Ok(true)
    }
}
