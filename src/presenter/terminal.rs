//! Line-oriented terminal renderer

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};

use crate::catalog::{ContextId, LineKind, OutputLine};
use crate::engine::SessionId;

use super::TranscriptPresenter;

/// Writes simulated output to a terminal (or any writer), colouring lines by
/// kind
pub struct TerminalPresenter<W: Write> {
    out: W,
    color: bool,
    echo: bool,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            echo: true,
        }
    }

    /// Whether submitted commands are echoed as `$ command` lines
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_prompt(&mut self, command: &str) -> io::Result<()> {
        if self.color {
            queue!(
                self.out,
                PrintStyledContent("$ ".green().bold()),
                PrintStyledContent(command.bold()),
                Print("\n")
            )
        } else {
            writeln!(self.out, "$ {command}")
        }
    }

    fn write_line(&mut self, line: &OutputLine) -> io::Result<()> {
        if !self.color {
            return writeln!(self.out, "{}", line.text);
        }
        let text = line.text.as_str();
        match line.kind {
            LineKind::Plain => queue!(self.out, Print(text), Print("\n")),
            LineKind::Info => queue!(self.out, PrintStyledContent(text.cyan()), Print("\n")),
            LineKind::Success => queue!(self.out, PrintStyledContent(text.green()), Print("\n")),
            LineKind::Error => queue!(self.out, PrintStyledContent(text.red()), Print("\n")),
        }
    }
}

impl<W: Write> TranscriptPresenter for TerminalPresenter<W> {
    fn echo_command(&mut self, _context: ContextId, command: &str) {
        if !self.echo {
            return;
        }
        if let Err(e) = self.write_prompt(command) {
            tracing::warn!(error = %e, "Failed to write prompt echo");
        }
    }

    fn append_line(&mut self, _context: ContextId, _session: SessionId, line: &OutputLine) {
        if let Err(e) = self.write_line(line) {
            tracing::warn!(error = %e, "Failed to write output line");
        }
    }

    fn scroll_to_latest(&mut self, _context: ContextId) {
        // A line terminal scrolls on its own; flushing makes the line visible
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "Failed to flush terminal");
        }
    }
}
