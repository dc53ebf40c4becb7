//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Output formatting functions
//! - This module - The [Prompter] capability and its implementations

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_abort_notice, display_error, display_latest_tag, display_new_version,
    display_planned_command, display_status, display_success,
};

/// Question asked before a tag is created.
pub const PUBLISH_QUESTION: &str = "Publish the new version? (y/N)";

/// Capability to ask the operator a yes/no question.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        (**self).confirm(question)
    }
}

/// Returns true only for the literal answer "y".
///
/// Only the line terminator is stripped. "Y", "yes", " y" and the empty
/// answer are all treated as no; the default is to not publish.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer
        .strip_suffix('\n')
        .map(|a| a.strip_suffix('\r').unwrap_or(a))
        .unwrap_or(answer);
    answer == "y"
}

/// Prompter that writes the question to `output` and reads one line from `input`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompter { input, output }
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process terminal.
    pub fn stdio() -> Self {
        LinePrompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer)?;
        if read == 0 {
            log::debug!("End of input while waiting for confirmation");
            return Ok(false);
        }

        Ok(is_affirmative(&answer))
    }
}

/// Prompter that replays canned answers, for tests and non-interactive use.
///
/// Answers go through the same [is_affirmative] rule as terminal input.
/// Once the answers run out every question is answered "no".
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Questions asked so far, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.questions.push(question.to_string());
        Ok(self
            .answers
            .pop_front()
            .map(|answer| is_affirmative(&answer))
            .unwrap_or(false))
    }
}
