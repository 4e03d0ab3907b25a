//! Timed playback of transcripts
//!
//! Each accepted transcript becomes a [`PlaybackSession`] driven by its own
//! task on the current runtime. Deadlines are absolute (`start + offset`), so
//! a slow presenter never stretches the schedule, and sessions never wait on
//! one another.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::catalog::{ContextId, OutputLine, Transcript};

use super::events::{PlaybackEvent, SessionId};

/// One line paired with the offset at which it becomes visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledLine {
    pub index: usize,
    pub line: OutputLine,
    /// Prefix sum of delays up to and including this line
    pub emit_at: Duration,
}

/// Lazy emission schedule for a transcript
#[derive(Debug, Clone)]
pub struct Schedule {
    transcript: Transcript,
    cursor: usize,
    offset: Duration,
}

impl Iterator for Schedule {
    type Item = ScheduledLine;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.transcript.lines().get(self.cursor)?.clone();
        self.offset += line.delay();
        let scheduled = ScheduledLine {
            index: self.cursor,
            line,
            emit_at: self.offset,
        };
        self.cursor += 1;
        Some(scheduled)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.transcript.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Schedule {}

/// Compute emission offsets for every line of `transcript`
pub fn schedule(transcript: &Transcript) -> Schedule {
    Schedule {
        transcript: transcript.clone(),
        cursor: 0,
        offset: Duration::ZERO,
    }
}

/// How authored delays map onto wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pacing {
    /// Delays as authored
    #[default]
    RealTime,
    /// Delays divided by the factor (2.0 plays twice as fast)
    Scaled(f64),
    /// Every line is emitted without waiting
    Instant,
}

impl Pacing {
    /// Pacing for a speed multiplier; non-finite or non-positive speeds play
    /// instantly
    pub fn from_speed(speed: f64) -> Self {
        if !speed.is_finite() || speed <= 0.0 {
            Pacing::Instant
        } else if (speed - 1.0).abs() < f64::EPSILON {
            Pacing::RealTime
        } else {
            Pacing::Scaled(speed)
        }
    }

    pub fn scale(&self, offset: Duration) -> Duration {
        match self {
            Pacing::RealTime => offset,
            // Very small speeds overflow Duration; saturate instead
            Pacing::Scaled(speed) => {
                Duration::try_from_secs_f64(offset.as_secs_f64() / speed).unwrap_or(Duration::MAX)
            }
            Pacing::Instant => Duration::ZERO,
        }
    }
}

/// Runtime state of one replay
#[derive(Debug)]
pub struct PlaybackSession {
    pub id: SessionId,
    pub context: ContextId,
    schedule: Schedule,
}

impl PlaybackSession {
    pub fn new(context: ContextId, transcript: &Transcript) -> Self {
        Self {
            id: SessionId::new(),
            context,
            schedule: schedule(transcript),
        }
    }

    /// Number of lines already handed out
    pub fn emitted(&self) -> usize {
        self.schedule.cursor
    }

    /// Offset accumulated so far
    pub fn offset(&self) -> Duration {
        self.schedule.offset
    }

    pub fn is_finished(&self) -> bool {
        self.schedule.cursor >= self.schedule.transcript.len()
    }

    /// Advance the cursor, returning the next line and its offset
    pub fn next_emission(&mut self) -> Option<ScheduledLine> {
        self.schedule.next()
    }
}

/// Summary of a session returned to the submitter
#[derive(Debug, Clone, PartialEq)]
pub struct SessionHandle {
    pub id: SessionId,
    pub context: ContextId,
    pub lines: usize,
    /// Paced duration from submission to the last line
    pub duration: Duration,
}

type Registry = Arc<Mutex<HashMap<ContextId, HashMap<SessionId, CancellationToken>>>>;

/// Starts playback sessions and tracks the ones still running
#[derive(Clone)]
pub struct PlaybackScheduler {
    events: mpsc::UnboundedSender<PlaybackEvent>,
    pacing: Pacing,
    running: Registry,
}

impl PlaybackScheduler {
    pub fn new(events: mpsc::UnboundedSender<PlaybackEvent>, pacing: Pacing) -> Self {
        Self {
            events,
            pacing,
            running: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Forward an event that is not tied to a timed line
    pub fn emit(&self, event: PlaybackEvent) {
        send(&self.events, event);
    }

    /// Register `transcript` for asynchronous playback and return at once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, context: ContextId, transcript: &Transcript) -> SessionHandle {
        let session = PlaybackSession::new(context, transcript);
        let handle = SessionHandle {
            id: session.id,
            context,
            lines: transcript.len(),
            duration: self.pacing.scale(transcript.total_duration()),
        };

        let token = CancellationToken::new();
        self.running
            .lock()
            .entry(context)
            .or_default()
            .insert(session.id, token.clone());

        self.emit(PlaybackEvent::SessionStarted {
            session: session.id,
            context,
            lines: handle.lines,
        });

        tracing::debug!(
            session = %session.id,
            context = %context,
            lines = handle.lines,
            duration_ms = u64::try_from(handle.duration.as_millis()).unwrap_or(u64::MAX),
            "Playback session started"
        );

        let start = Instant::now();
        tokio::spawn(run_session(
            session,
            start,
            self.pacing,
            token,
            self.events.clone(),
            Arc::clone(&self.running),
        ));

        handle
    }

    /// Cancel every running session in `context`, returning how many were
    /// signalled
    pub fn cancel_context(&self, context: ContextId) -> usize {
        let tokens = self.running.lock().remove(&context).unwrap_or_default();
        for token in tokens.values() {
            token.cancel();
        }
        if !tokens.is_empty() {
            tracing::debug!(context = %context, count = tokens.len(), "Cancelled playback sessions");
        }
        tokens.len()
    }

    /// Sessions still pending in `context`
    pub fn active_sessions(&self, context: ContextId) -> usize {
        self.running.lock().get(&context).map_or(0, HashMap::len)
    }

    /// Sessions still pending across all contexts
    pub fn total_active(&self) -> usize {
        self.running.lock().values().map(HashMap::len).sum()
    }
}

async fn run_session(
    mut session: PlaybackSession,
    start: Instant,
    pacing: Pacing,
    token: CancellationToken,
    events: mpsc::UnboundedSender<PlaybackEvent>,
    running: Registry,
) {
    let (id, context) = (session.id, session.context);

    while let Some(scheduled) = session.next_emission() {
        let deadline = deadline_after(start, pacing.scale(scheduled.emit_at));
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                let emitted = scheduled.index;
                tracing::debug!(session = %id, emitted, "Playback session cancelled");
                send(
                    &events,
                    PlaybackEvent::SessionCancelled {
                        session: id,
                        context,
                        emitted,
                    },
                );
                return;
            }
            _ = tokio::time::sleep_until(deadline) => {}
        }

        let line = PlaybackEvent::Line {
            session: id,
            context,
            index: scheduled.index,
            line: scheduled.line,
        };
        if events.send(line).is_err() {
            // Presenter gone; nothing left to render into
            unregister(&running, context, id);
            return;
        }
    }

    unregister(&running, context, id);
    tracing::debug!(session = %id, lines = session.emitted(), "Playback session completed");
    send(
        &events,
        PlaybackEvent::SessionCompleted {
            session: id,
            context,
        },
    );
}

fn send(events: &mpsc::UnboundedSender<PlaybackEvent>, event: PlaybackEvent) {
    if events.send(event).is_err() {
        tracing::debug!("Playback event dropped: presenter closed");
    }
}

/// `start + offset`, or roughly thirty years out when that overflows
fn deadline_after(start: Instant, offset: Duration) -> Instant {
    start
        .checked_add(offset)
        .unwrap_or_else(|| start + Duration::from_secs(86_400 * 365 * 30))
}

fn unregister(running: &Registry, context: ContextId, id: SessionId) {
    let mut guard = running.lock();
    if let Some(sessions) = guard.get_mut(&context) {
        sessions.remove(&id);
        if sessions.is_empty() {
            guard.remove(&context);
        }
    }
}
