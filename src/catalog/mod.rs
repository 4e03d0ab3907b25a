//! Static catalog of scripted console interactions

mod library;
mod transcript;

pub use library::{
    CatalogEntry, CatalogError, CommandMap, ConsoleContext, ContextId, ContextLibrary,
    BUILTIN_CATALOG,
};
pub use transcript::{LineKind, OutputLine, Transcript, UNRECOGNIZED_MESSAGE};
