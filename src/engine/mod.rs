//! Command-simulation engine
//!
//! Input flows `Simulator::submit_command` -> [`matcher::resolve`] ->
//! [`PlaybackScheduler`] -> [`PlaybackEvent`] stream. Presenters consume the
//! stream; the engine never renders anything itself.

pub mod events;
pub mod matcher;
pub mod scheduler;
pub mod simulator;

pub use events::{PlaybackEvent, SessionId};
pub use matcher::{resolve, CommandMatch, MatchRule};
pub use scheduler::{
    schedule, Pacing, PlaybackScheduler, PlaybackSession, Schedule, ScheduledLine, SessionHandle,
};
pub use simulator::{Simulator, SimulatorOptions, Submission};
