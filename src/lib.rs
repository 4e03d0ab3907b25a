pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod exercises;
pub mod presenter;
pub mod progress;
pub mod util;

pub use catalog::{ContextId, ContextLibrary, LineKind, OutputLine, Transcript};
pub use config::Config;
pub use engine::{MatchRule, PlaybackEvent, SessionId, Simulator, SimulatorOptions, Submission};
pub use presenter::{OutputLog, TerminalPresenter, TranscriptPresenter};
pub use progress::{JsonFileStore, MemoryStore, Progress, ProgressStore};
