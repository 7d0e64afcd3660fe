//! Numbered-list prompts for `asa config --init`.

use std::io::{self, BufRead, Write};

use crate::models::NamedRef;
use crate::wizard::Selector;

/// A [`Selector`] that lists options with numbers and reads the answer
/// from a line of input.
///
/// Multiple choices are comma separated and kept in the order typed.
/// An empty line, end of input or a failed write declines.
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the options and read one answer. `None` when the prompt cannot
    /// be shown or nothing can be read.
    fn ask(&mut self, prompt: &str, options: &[NamedRef], hint: &str) -> Option<String> {
        if let Err(e) = self.show(prompt, options, hint) {
            tracing::warn!(error = %e, "could not show prompt");
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn show(&mut self, prompt: &str, options: &[NamedRef], hint: &str) -> io::Result<()> {
        writeln!(self.output, "\n{prompt}:")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, option.name)?;
        }
        write!(self.output, "{hint}> ")?;
        self.output.flush()
    }

    fn complain(&mut self, count: usize) -> io::Result<()> {
        writeln!(
            self.output,
            "Please enter numbers between 1 and {count}, separated by commas."
        )
    }
}

/// Parse 1-based, comma separated indices. `None` when any entry is invalid.
fn parse_indices(line: &str, count: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for part in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let n: usize = part.parse().ok()?;
        if n == 0 || n > count {
            return None;
        }
        if !indices.contains(&(n - 1)) {
            indices.push(n - 1);
        }
    }
    Some(indices)
}

impl<R: BufRead, W: Write> Selector for PromptSelector<R, W> {
    fn choose_one(&mut self, prompt: &str, options: &[NamedRef]) -> Option<NamedRef> {
        loop {
            let line = self.ask(prompt, options, "")?;
            if line.is_empty() {
                return None;
            }
            match parse_indices(&line, options.len()).as_deref() {
                Some([index]) => return Some(options[*index].clone()),
                _ => self.complain(options.len()).ok()?,
            }
        }
    }

    fn choose_many(&mut self, prompt: &str, options: &[NamedRef]) -> Vec<NamedRef> {
        loop {
            let Some(line) = self.ask(prompt, options, "(e.g. 1,3) ") else {
                return Vec::new();
            };
            match parse_indices(&line, options.len()) {
                Some(indices) => return indices.into_iter().map(|i| options[i].clone()).collect(),
                None => {
                    if self.complain(options.len()).is_err() {
                        return Vec::new();
                    }
                }
            }
        }
    }
}
