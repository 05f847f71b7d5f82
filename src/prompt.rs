//! Line based interactive prompts.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use thiserror::Error;
use tracing::debug;

const DEFAULT_MAX_ATTEMPTS: usize = 3;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("failed to talk to the terminal")]
    Io(#[from] io::Error),
    #[error("no valid answer after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Asks questions on `output` and reads the answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: usize,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// A prompter bound to the process' standard input and output.
    pub fn stdio() -> Self {
        Prompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output, max_attempts: DEFAULT_MAX_ATTEMPTS }
    }

    /// How many answers [`Prompter::confirm`] reads before giving up, at least one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Prints `question` (if any) and returns the next line without its line ending.
    ///
    /// The end of the input reads as an empty answer.
    pub fn get_input(&mut self, question: &str) -> Result<String, PromptError> {
        if !question.is_empty() {
            self.output.write_all(question.as_bytes())?;
            self.output.flush()?;
        }
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        if answer.ends_with('\n') {
            answer.pop();
            if answer.ends_with('\r') {
                answer.pop();
            }
        }
        Ok(answer)
    }

    /// Asks a yes/no `question`, an empty answer meaning yes.
    ///
    /// Unrecognised answers ask again until the attempts run out.
    pub fn confirm(&mut self, question: &str) -> Result<bool, PromptError> {
        let question = format!("{question} (Y/n) ");
        for attempt in 1..=self.max_attempts {
            match self.get_input(&question)?.as_str() {
                "" | "y" | "Y" => return Ok(true),
                "n" | "N" => return Ok(false),
                other => debug!(attempt, answer = other, "unrecognised confirmation"),
            }
        }
        Err(PromptError::Exhausted { attempts: self.max_attempts })
    }

    /// Stores the answer to `question` in `target`.
    pub fn set_from_input(&mut self, target: &mut String, question: &str) -> Result<(), PromptError> {
        *target = self.get_input(question)?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}
