//! In-memory, append-only output log

use std::collections::BTreeMap;

use crate::catalog::{ContextId, LineKind, OutputLine};
use crate::engine::SessionId;

use super::TranscriptPresenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Prompt,
    Output(LineKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// `None` for prompt echoes
    pub session: Option<SessionId>,
    pub style: LineStyle,
    pub text: String,
}

/// Output area of one console
#[derive(Debug, Clone, Default)]
pub struct Pane {
    lines: Vec<RenderedLine>,
    scroll_signals: usize,
    finished: Vec<(SessionId, bool)>,
}

impl Pane {
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    /// Number of scroll-to-latest requests received
    pub fn scroll_signals(&self) -> usize {
        self.scroll_signals
    }

    /// Finished sessions in completion order, with their cancelled flag
    pub fn finished(&self) -> &[(SessionId, bool)] {
        &self.finished
    }

    /// Lines produced by `session`, in arrival order
    pub fn session_lines(&self, session: SessionId) -> impl Iterator<Item = &RenderedLine> {
        self.lines
            .iter()
            .filter(move |l| l.session == Some(session))
    }
}

/// Presenter that records everything per context; used by tests and
/// non-interactive callers
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    panes: BTreeMap<ContextId, Pane>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pane(&self, context: ContextId) -> Option<&Pane> {
        self.panes.get(&context)
    }

    pub fn lines(&self, context: ContextId) -> &[RenderedLine] {
        self.panes.get(&context).map(|p| p.lines()).unwrap_or(&[])
    }

    /// Pane contents as plain text, prompts prefixed with `$ `
    pub fn text(&self, context: ContextId) -> String {
        self.lines(context)
            .iter()
            .map(|l| match l.style {
                LineStyle::Prompt => format!("$ {}", l.text),
                LineStyle::Output(_) => l.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TranscriptPresenter for OutputLog {
    fn echo_command(&mut self, context: ContextId, command: &str) {
        self.panes.entry(context).or_default().lines.push(RenderedLine {
            session: None,
            style: LineStyle::Prompt,
            text: command.to_string(),
        });
    }

    fn append_line(&mut self, context: ContextId, session: SessionId, line: &OutputLine) {
        self.panes.entry(context).or_default().lines.push(RenderedLine {
            session: Some(session),
            style: LineStyle::Output(line.kind),
            text: line.text.clone(),
        });
    }

    fn scroll_to_latest(&mut self, context: ContextId) {
        self.panes.entry(context).or_default().scroll_signals += 1;
    }

    fn session_finished(&mut self, context: ContextId, session: SessionId, cancelled: bool) {
        self.panes
            .entry(context)
            .or_default()
            .finished
            .push((session, cancelled));
    }
}
