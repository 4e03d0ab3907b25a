use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{ContextId, OutputLine};

/// Identifier of one playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events flowing from the playback engine to a presenter
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A non-blank command was accepted; presenters echo it as a prompt line
    CommandEchoed { context: ContextId, command: String },

    /// A session was registered and its first line is pending
    SessionStarted {
        session: SessionId,
        context: ContextId,
        lines: usize,
    },

    /// A transcript line became visible
    Line {
        session: SessionId,
        context: ContextId,
        index: usize,
        line: OutputLine,
    },

    /// Every line of the session has been emitted
    SessionCompleted {
        session: SessionId,
        context: ContextId,
    },

    /// The session was cancelled before its last line
    SessionCancelled {
        session: SessionId,
        context: ContextId,
        emitted: usize,
    },
}

impl PlaybackEvent {
    pub fn context(&self) -> ContextId {
        match self {
            PlaybackEvent::CommandEchoed { context, .. }
            | PlaybackEvent::SessionStarted { context, .. }
            | PlaybackEvent::Line { context, .. }
            | PlaybackEvent::SessionCompleted { context, .. }
            | PlaybackEvent::SessionCancelled { context, .. } => *context,
        }
    }

    pub fn session(&self) -> Option<SessionId> {
        match self {
            PlaybackEvent::CommandEchoed { .. } => None,
            PlaybackEvent::SessionStarted { session, .. }
            | PlaybackEvent::Line { session, .. }
            | PlaybackEvent::SessionCompleted { session, .. }
            | PlaybackEvent::SessionCancelled { session, .. } => Some(*session),
        }
    }

    /// True for the final event of a session
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PlaybackEvent::SessionCompleted { .. } | PlaybackEvent::SessionCancelled { .. }
        )
    }

    /// Human-readable event type name for logging
    pub fn event_type_name(&self) -> &'static str {
        match self {
            PlaybackEvent::CommandEchoed { .. } => "CommandEchoed",
            PlaybackEvent::SessionStarted { .. } => "SessionStarted",
            PlaybackEvent::Line { .. } => "Line",
            PlaybackEvent::SessionCompleted { .. } => "SessionCompleted",
            PlaybackEvent::SessionCancelled { .. } => "SessionCancelled",
        }
    }
}
