//! Console prompter - asks the operator on a terminal.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::domain::assignment::RosterError;
use crate::domain::foundation::{AgentId, ItemId};
use crate::ports::{PromptError, SituationPrompter};

/// Prompts on any line-oriented reader/writer pair.
///
/// Answers are whitespace or comma separated names; an empty line means none.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<BufReader<Stdin>, Stdout> {
    /// Prompter bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask(&mut self, question: &str) -> Result<Vec<String>, PromptError> {
        write!(self.output, "{} ", question).map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(PromptError::Exhausted);
        }
        Ok(split_names(&line))
    }
}

impl<R: BufRead, W: Write> SituationPrompter for ConsolePrompter<R, W> {
    fn ask_absent(&mut self, agents: &[AgentId]) -> Result<Vec<String>, PromptError> {
        let names: Vec<&str> = agents.iter().map(AgentId::as_str).collect();
        writeln!(self.output, "Housemates: {}", names.join(", ")).map_err(io_error)?;
        self.ask("Who is absent this week?")
    }

    fn ask_skipped(
        &mut self,
        required: usize,
        items: &[ItemId],
    ) -> Result<Vec<String>, PromptError> {
        let names: Vec<&str> = items.iter().map(ItemId::as_str).collect();
        writeln!(self.output, "Chores: {}", names.join(", ")).map_err(io_error)?;
        self.ask(&format!("Which {} chores should be skipped?", required))
    }

    fn reject(&mut self, problem: &RosterError) -> Result<(), PromptError> {
        writeln!(self.output, "{}", problem).map_err(io_error)
    }
}

fn io_error(e: io::Error) -> PromptError {
    PromptError::Io(e.to_string())
}

fn split_names(line: &str) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
