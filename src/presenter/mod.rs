//! Presenter boundary
//!
//! A presenter receives, per session, ordered `(text, kind)` lines, a
//! scroll-to-latest signal after every line, and a completion signal followed
//! by one more scroll. It never talks back to the engine.

mod output_log;
mod terminal;

use tokio::sync::mpsc;

use crate::catalog::{ContextId, OutputLine};
use crate::engine::{PlaybackEvent, SessionId};

pub use output_log::{LineStyle, OutputLog, Pane, RenderedLine};
pub use terminal::TerminalPresenter;

/// Output surface for simulated consoles
pub trait TranscriptPresenter {
    /// Show the submitted command as a prompt line
    fn echo_command(&mut self, context: ContextId, command: &str);

    /// Append one transcript line; the log is never rewritten
    fn append_line(&mut self, context: ContextId, session: SessionId, line: &OutputLine);

    /// Bring the newest line of `context` into view
    fn scroll_to_latest(&mut self, context: ContextId);

    fn session_finished(&mut self, _context: ContextId, _session: SessionId, _cancelled: bool) {}
}

/// How a watched session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Cancelled,
    /// The engine went away before the session finished
    Disconnected,
}

/// Apply one engine event to `presenter`
pub fn present<P>(presenter: &mut P, event: &PlaybackEvent)
where
    P: TranscriptPresenter + ?Sized,
{
    match event {
        PlaybackEvent::CommandEchoed { context, command } => {
            presenter.echo_command(*context, command);
            presenter.scroll_to_latest(*context);
        }
        PlaybackEvent::SessionStarted { .. } => {}
        PlaybackEvent::Line {
            session,
            context,
            line,
            ..
        } => {
            presenter.append_line(*context, *session, line);
            presenter.scroll_to_latest(*context);
        }
        PlaybackEvent::SessionCompleted { session, context } => {
            presenter.session_finished(*context, *session, false);
            presenter.scroll_to_latest(*context);
        }
        PlaybackEvent::SessionCancelled {
            session, context, ..
        } => {
            presenter.session_finished(*context, *session, true);
            presenter.scroll_to_latest(*context);
        }
    }
}

/// Present events until `session` finishes.
///
/// Events of other sessions that arrive meanwhile are presented too.
pub async fn present_until_finished<P>(
    events: &mut mpsc::UnboundedReceiver<PlaybackEvent>,
    presenter: &mut P,
    session: SessionId,
) -> SessionOutcome
where
    P: TranscriptPresenter + ?Sized,
{
    while let Some(event) = events.recv().await {
        present(presenter, &event);
        match event {
            PlaybackEvent::SessionCompleted { session: s, .. } if s == session => {
                return SessionOutcome::Completed;
            }
            PlaybackEvent::SessionCancelled { session: s, .. } if s == session => {
                return SessionOutcome::Cancelled;
            }
            _ => {}
        }
    }
    SessionOutcome::Disconnected
}

/// Present whatever is already queued without waiting; returns the count
pub fn drain_ready<P>(events: &mut mpsc::UnboundedReceiver<PlaybackEvent>, presenter: &mut P) -> usize
where
    P: TranscriptPresenter + ?Sized,
{
    let mut count = 0;
    while let Ok(event) = events.try_recv() {
        present(presenter, &event);
        count += 1;
    }
    count
}
