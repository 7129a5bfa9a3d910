//! Yes/no confirmation prompts.

use std::io::{self, BufRead, Write};

/// Asks the user to confirm an action.
pub trait Confirm {
    /// Returns whether the user accepted `question`.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Accepts every question, e.g. for `--yes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, question: &str) -> bool {
        log::info!("{question} [y/n] y (assumed)");
        true
    }
}

/// Declines every question.
#[derive(Debug, Default, Clone, Copy)]
pub struct Decline;

impl Confirm for Decline {
    fn confirm(&mut self, question: &str) -> bool {
        log::info!("{question} [y/n] n (declined)");
        false
    }
}

/// Asks on `output` and reads a `y`/`yes` answer from `input`.
///
/// Anything else, including end of input and I/O errors, declines.
#[derive(Debug)]
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

/// Asks on the terminal.
pub type StdinConfirm = LineConfirm<io::StdinLock<'static>, io::Stderr>;

impl StdinConfirm {
    /// Creates a prompt reading standard input and writing standard error.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    /// Creates a prompt over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the prompt and returns its output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if write!(self.output, "{question} [y/n] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(err) => {
                log::warn!("failed to read the answer: {err}");
                false
            }
        }
    }
}
