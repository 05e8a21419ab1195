//! Shared UI primitives for clib
//!
//! All terminal input goes through [`Prompter`], so command code never
//! talks to the terminal directly and can be driven by a script in tests.
//!
//! Conventions:
//! - Prompts end with a colon: `Enter command:`
//! - Replies are printed as returned by the command, unchanged

use anyhow::Result;
use inquire::{ui::RenderConfig, InquireError, Text};
use std::io::{self, BufRead, IsTerminal, Write};

/// Source of user input for the REPL and for follow-up questions asked by
/// commands such as `delete note`.
pub trait Prompter {
    /// Ask for one line. `None` means the user cancelled (Esc, Ctrl-C or
    /// end of input).
    fn ask(&mut self, message: &str) -> Result<Option<String>>;

    /// Show text to the user.
    fn show(&mut self, text: &str);
}

/// Interactive prompts on a terminal
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        let result = Text::new(message)
            .with_render_config(minimal_render_config())
            .prompt();

        match result {
            Ok(input) => Ok(Some(input)),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn show(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Line-oriented prompts over any reader/writer pair. Used when stdin is
/// not a terminal, and in tests.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", message)?;
        self.output.flush()?;

        // Bytes that are not UTF-8 become U+FFFD instead of failing the read
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn show(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{}", text) {
            tracing::warn!(error = %e, "failed to write output");
        }
    }
}

/// Pick the terminal prompter when attached to a TTY, line mode otherwise.
pub fn stdin_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        Box::new(InquirePrompter)
    } else {
        Box::new(LinePrompter::new(io::stdin().lock(), io::stdout()))
    }
}

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Get terminal dimensions, defaulting to 80x24 if unavailable
pub fn term_size() -> (usize, usize) {
    crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", kept.trim_end())
}

/// Print an error message to stderr
#[inline]
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Print a warning message to stderr
#[inline]
pub fn warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::LinePrompter;
    use std::io::Cursor;

    pub type ScriptedPrompter = LinePrompter<Cursor<Vec<u8>>, Vec<u8>>;

    /// Prompter that answers with `lines` in order, then reports end of input.
    pub fn scripted(lines: &[&str]) -> ScriptedPrompter {
        let mut input = lines.join("\n");
        if !lines.is_empty() {
            input.push('\n');
        }
        LinePrompter::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    pub fn output(prompter: ScriptedPrompter) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }
}
