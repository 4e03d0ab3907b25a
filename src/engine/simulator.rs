//! Command submission: match, fall back, play

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalog::{ContextId, ContextLibrary, Transcript};

use super::events::PlaybackEvent;
use super::matcher::{self, MatchRule};
use super::scheduler::{Pacing, PlaybackScheduler, SessionHandle};

/// Engine behaviour knobs
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatorOptions {
    pub pacing: Pacing,
    /// Cancel a context's running sessions when a new command arrives there.
    /// Off by default: sessions are fire-and-forget.
    pub cancel_on_submit: bool,
}

/// Outcome of [`Simulator::submit_command`]
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Blank input; nothing was emitted
    Ignored,
    /// A catalog entry matched and is playing
    Playing {
        command: String,
        rule: MatchRule,
        session: SessionHandle,
    },
    /// Nothing matched; the fallback error line is playing
    Unrecognized { session: SessionHandle },
}

impl Submission {
    pub fn session(&self) -> Option<&SessionHandle> {
        match self {
            Submission::Ignored => None,
            Submission::Playing { session, .. } | Submission::Unrecognized { session } => {
                Some(session)
            }
        }
    }
}

/// The command-simulation engine
pub struct Simulator {
    library: Arc<ContextLibrary>,
    scheduler: PlaybackScheduler,
    options: SimulatorOptions,
}

impl Simulator {
    /// Create an engine and the event stream its presenter consumes
    pub fn new(
        library: Arc<ContextLibrary>,
        options: SimulatorOptions,
    ) -> (Self, mpsc::UnboundedReceiver<PlaybackEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = PlaybackScheduler::new(tx, options.pacing);
        (
            Self {
                library,
                scheduler,
                options,
            },
            rx,
        )
    }

    pub fn library(&self) -> &ContextLibrary {
        &self.library
    }

    pub fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }

    pub fn options(&self) -> SimulatorOptions {
        self.options
    }

    /// Handle one Enter press in the console identified by `context`.
    ///
    /// Returns without waiting for playback. Must be called from within a
    /// tokio runtime.
    pub fn submit_command(&self, context: ContextId, raw: &str) -> Submission {
        let command = raw.trim();
        if command.is_empty() {
            return Submission::Ignored;
        }

        if self.options.cancel_on_submit {
            self.scheduler.cancel_context(context);
        }

        self.scheduler.emit(PlaybackEvent::CommandEchoed {
            context,
            command: command.to_string(),
        });

        match matcher::resolve(command, self.library.lookup(context)) {
            Some(found) => {
                tracing::info!(
                    context = %context,
                    input = command,
                    matched = found.command(),
                    rule = found.rule.as_str(),
                    "Command matched"
                );
                let session = self.scheduler.spawn(context, found.transcript());
                Submission::Playing {
                    command: found.command().to_string(),
                    rule: found.rule,
                    session,
                }
            }
            None => {
                tracing::info!(context = %context, input = command, "Command not recognized");
                let session = self.scheduler.spawn(context, &Transcript::unrecognized());
                Submission::Unrecognized { session }
            }
        }
    }
}
