use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, BufRead, Write};

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const USER_PROMPT: Color = Color::Green;
    const ASSISTANT_TEXT: Color = Color::Cyan;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
    const HEADER: Color = Color::Magenta;
}

/// Line-oriented terminal I/O for the chatbot.
///
/// Generic over its input and output so the conversation can be scripted.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<io::StdinLock<'static>, io::Stdout> {
    /// Terminal bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print the startup banner.
    pub fn print_banner(&mut self) -> Result<()> {
        execute!(
            self.output,
            SetForegroundColor(Colors::HEADER),
            Print("=== PDF Chatbot ===\n"),
            ResetColor,
        )?;
        Ok(())
    }

    /// Show `label` and read one trimmed line. `None` on end of input.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        execute!(
            self.output,
            SetForegroundColor(Colors::USER_PROMPT),
            Print(label),
            ResetColor,
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Print a section heading, preceded by a blank line.
    pub fn print_heading(&mut self, heading: &str) -> Result<()> {
        execute!(self.output, Print(format!("\n{}\n", heading)))?;
        Ok(())
    }

    /// Print model output.
    pub fn print_answer(&mut self, text: &str) -> Result<()> {
        execute!(
            self.output,
            SetForegroundColor(Colors::ASSISTANT_TEXT),
            Print(format!("{}\n", text)),
            ResetColor,
        )?;
        Ok(())
    }

    /// Print an error message.
    pub fn print_error(&mut self, msg: &str) -> Result<()> {
        execute!(
            self.output,
            SetForegroundColor(Colors::ERROR),
            Print(format!("{}\n", msg)),
            ResetColor,
        )?;
        Ok(())
    }

    /// Print an info message.
    pub fn print_info(&mut self, msg: &str) -> Result<()> {
        execute!(
            self.output,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", msg)),
            ResetColor,
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_trims_and_detects_eof() {
        let mut term = Terminal::new(Cursor::new("  hello  \n"), Vec::new());
        assert_eq!(term.prompt("> ").unwrap().as_deref(), Some("hello"));
        assert_eq!(term.prompt("> ").unwrap(), None);

        let out = String::from_utf8(term.into_output()).unwrap();
        assert_eq!(out.matches("> ").count(), 2);
    }

    #[test]
    fn heading_then_answer() {
        let mut term = Terminal::new(Cursor::new(""), Vec::new());
        term.print_heading("Answer:").unwrap();
        term.print_answer("forty-two").unwrap();
        let out = String::from_utf8(term.into_output()).unwrap();
        assert!(out.contains("\nAnswer:\n"));
        assert!(out.contains("forty-two\n"));
    }
}
