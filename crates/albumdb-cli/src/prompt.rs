//! Field prompting.
//!
//! Each resolver takes the value the caller already has. Only when that is
//! `None` does it ask the [`InputProvider`], so the session can be driven by
//! a script as easily as by a terminal.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("input closed while reading {0}")]
    Closed(&'static str),
}

pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Source of answers to prompts, and sink for user-facing messages.
pub trait InputProvider {
    /// Show `prompt` and read one line, without its line ending.
    ///
    /// Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Show a message on its own line.
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// Line-based provider over any reader/writer pair.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// A provider reading stdin and writing stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the provider and hand back what was written.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> InputProvider for Terminal<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

fn ask(
    input: &mut impl InputProvider,
    prompt: &str,
    field: &'static str,
) -> PromptResult<String> {
    input
        .read_line(prompt)?
        .map(|line| line.trim().to_string())
        .ok_or(PromptError::Closed(field))
}

/// Trim a supplied value; blank counts as not supplied.
fn supplied(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the artist name. Blank answers are asked again.
pub fn artist(input: &mut impl InputProvider, name: Option<String>) -> PromptResult<String> {
    if let Some(name) = supplied(name) {
        return Ok(name);
    }
    loop {
        let answer = ask(input, "Enter artist name: ", "artist")?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        input.notify("Artist name cannot be empty.")?;
    }
}

/// Resolve the genre. A blank answer leaves it unset.
pub fn genre(
    input: &mut impl InputProvider,
    genre: Option<String>,
) -> PromptResult<Option<String>> {
    if let Some(genre) = supplied(genre) {
        return Ok(Some(genre));
    }
    let answer = ask(input, "Enter genre: ", "genre")?;
    Ok(Some(answer).filter(|g| !g.is_empty()))
}

/// Resolve the year, asking until the answer is an integer that fits.
pub fn year(input: &mut impl InputProvider, year: Option<i32>) -> PromptResult<i32> {
    if let Some(year) = year {
        return Ok(year);
    }
    loop {
        let answer = ask(input, "Enter year: ", "year")?;
        match answer.parse::<i64>().map(i32::try_from) {
            Ok(Ok(year)) => return Ok(year),
            Ok(Err(_)) => input.notify(&format!(
                "Year {answer} is out of range ({} to {}).",
                i32::MIN,
                i32::MAX
            ))?,
            Err(_) => input.notify("Please enter a valid integer for year.")?,
        }
    }
}

/// Resolve the classic flag. Anything but a yes-like answer is `false`.
pub fn is_classic(input: &mut impl InputProvider, value: Option<bool>) -> PromptResult<bool> {
    if let Some(value) = value {
        return Ok(value);
    }
    let answer = ask(input, "Is it a classic? (y/n): ", "classic flag")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.to_lowercase().as_str(),
        "y" | "yes" | "true" | "1"
    )
}
