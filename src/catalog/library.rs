//! Context library: context id -> command -> transcript

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transcript::{OutputLine, Transcript};

/// Built-in catalog bundled with the binary
pub const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Context {0} is defined more than once")]
    DuplicateContext(ContextId),
    #[error("Context {0} has a command with an empty name")]
    EmptyCommand(ContextId),
    #[error("Command '{command}' in context {context} has no output lines")]
    EmptyTranscript { context: ContextId, command: String },
    #[error("Command '{command}' in context {context} is defined more than once")]
    DuplicateCommand { context: ContextId, command: String },
}

/// Identifies which simulated console a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(pub u32);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ContextId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A catalog key together with its transcript
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Command as authored (case preserved)
    pub command: String,
    pub transcript: Transcript,
}

/// Commands of one context, in catalog order
#[derive(Debug, Clone, Default)]
pub struct CommandMap {
    entries: Vec<CatalogEntry>,
}

static EMPTY_COMMANDS: CommandMap = CommandMap {
    entries: Vec::new(),
};

impl CommandMap {
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Authored command strings, in catalog order
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.command.as_str())
    }

    /// Case-insensitive exact lookup
    pub fn get(&self, command: &str) -> Option<&Transcript> {
        let needle = command.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.command.to_lowercase() == needle)
            .map(|e| &e.transcript)
    }
}

/// One simulated console
#[derive(Debug, Clone)]
pub struct ConsoleContext {
    pub id: ContextId,
    pub title: String,
    pub commands: CommandMap,
}

/// Process-wide, read-only catalog of scripted interactions
#[derive(Debug, Clone, Default)]
pub struct ContextLibrary {
    contexts: BTreeMap<ContextId, ConsoleContext>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "context", default)]
    contexts: Vec<CatalogContextEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogContextEntry {
    id: ContextId,
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "command", default)]
    commands: Vec<CatalogCommandEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogCommandEntry {
    command: String,
    #[serde(default)]
    lines: Vec<OutputLine>,
}

impl ContextLibrary {
    /// Parse the catalog bundled with the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file from disk
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a catalog document
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let mut contexts = BTreeMap::new();

        for raw in file.contexts {
            if contexts.contains_key(&raw.id) {
                return Err(CatalogError::DuplicateContext(raw.id));
            }

            let mut seen = HashSet::new();
            let mut entries = Vec::with_capacity(raw.commands.len());
            for cmd in raw.commands {
                if cmd.command.trim().is_empty() {
                    return Err(CatalogError::EmptyCommand(raw.id));
                }
                if !seen.insert(cmd.command.to_lowercase()) {
                    return Err(CatalogError::DuplicateCommand {
                        context: raw.id,
                        command: cmd.command,
                    });
                }
                let Some(transcript) = Transcript::new(cmd.lines) else {
                    return Err(CatalogError::EmptyTranscript {
                        context: raw.id,
                        command: cmd.command,
                    });
                };
                entries.push(CatalogEntry {
                    command: cmd.command,
                    transcript,
                });
            }

            let title = raw
                .title
                .unwrap_or_else(|| format!("Console {}", raw.id));
            contexts.insert(
                raw.id,
                ConsoleContext {
                    id: raw.id,
                    title,
                    commands: CommandMap { entries },
                },
            );
        }

        tracing::debug!(contexts = contexts.len(), "Loaded command catalog");
        Ok(Self { contexts })
    }

    /// Commands for `context`; empty for unknown ids
    pub fn lookup(&self, context: ContextId) -> &CommandMap {
        self.contexts
            .get(&context)
            .map(|c| &c.commands)
            .unwrap_or(&EMPTY_COMMANDS)
    }

    pub fn context(&self, context: ContextId) -> Option<&ConsoleContext> {
        self.contexts.get(&context)
    }

    /// All contexts ordered by id
    pub fn contexts(&self) -> impl Iterator<Item = &ConsoleContext> {
        self.contexts.values()
    }

    pub fn contains(&self, context: ContextId) -> bool {
        self.contexts.contains_key(&context)
    }

    /// Total number of catalog entries across contexts
    pub fn entry_count(&self) -> usize {
        self.contexts.values().map(|c| c.commands.len()).sum()
    }
}
