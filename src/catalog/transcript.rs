//! Output line and transcript value records

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Presentation style of a simulated output line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    #[default]
    Plain,
    Info,
    Success,
    Error,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Plain => "plain",
            LineKind::Info => "info",
            LineKind::Success => "success",
            LineKind::Error => "error",
        }
    }
}

/// One line of a simulated terminal transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLine {
    /// Verbatim text, including any box-drawing or ASCII art
    pub text: String,
    #[serde(default)]
    pub kind: LineKind,
    /// Wait since the previous line of the same transcript
    #[serde(default)]
    pub delay_ms: u64,
}

impl OutputLine {
    pub fn new(text: impl Into<String>, kind: LineKind, delay_ms: u64) -> Self {
        Self {
            text: text.into(),
            kind,
            delay_ms,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Ordered, non-empty script of what a recognized command prints.
///
/// Immutable once built; cloning is cheap because playback sessions share the
/// underlying lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: Arc<[OutputLine]>,
}

impl Transcript {
    /// Build a transcript, returning `None` when `lines` is empty
    pub fn new(lines: Vec<OutputLine>) -> Option<Self> {
        if lines.is_empty() {
            return None;
        }
        Some(Self {
            lines: lines.into(),
        })
    }

    /// Single error line shown when no catalog entry matches
    pub fn unrecognized() -> Self {
        Self {
            lines: vec![OutputLine::new(
                UNRECOGNIZED_MESSAGE,
                LineKind::Error,
                0,
            )]
            .into(),
        }
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> &OutputLine {
        // Non-empty by construction
        &self.lines[self.lines.len() - 1]
    }

    /// Sum of every line's delay
    pub fn total_duration(&self) -> Duration {
        Duration::from_millis(self.lines.iter().map(|l| l.delay_ms).sum())
    }
}

/// Fixed fallback text for input that matches nothing
pub const UNRECOGNIZED_MESSAGE: &str =
    "Command not recognized in simulator. Try the suggested commands below!";
