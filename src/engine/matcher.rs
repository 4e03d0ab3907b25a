//! Resolve free-text input against a context's command catalog
//!
//! Resolution is a single pass over the catalog in authored order:
//!
//! 1. an exact (case-insensitive) match returns immediately
//! 2. a key that starts with the whole input is a candidate
//! 3. a key whose first two words appear in the input is a candidate
//!
//! Candidates from rules 2 and 3 overwrite each other as the scan proceeds, so
//! the last satisfying key wins. Only exact matches are independent of
//! catalog order.

use crate::catalog::{CatalogEntry, CommandMap, Transcript};

/// Which rule selected a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    Prefix,
    TwoToken,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchRule::Exact => "exact",
            MatchRule::Prefix => "prefix",
            MatchRule::TwoToken => "two-token",
        }
    }
}

/// A resolved catalog entry
#[derive(Debug, Clone, Copy)]
pub struct CommandMatch<'a> {
    pub entry: &'a CatalogEntry,
    pub rule: MatchRule,
}

impl<'a> CommandMatch<'a> {
    pub fn command(&self) -> &'a str {
        &self.entry.command
    }

    pub fn transcript(&self) -> &'a Transcript {
        &self.entry.transcript
    }
}

/// Find the entry for `input` in `commands`.
///
/// `input` is trimmed first; blank input never matches. Returns `None` when no
/// rule is satisfied by any key.
pub fn resolve<'a>(input: &str, commands: &'a CommandMap) -> Option<CommandMatch<'a>> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let mut candidate = None;
    for entry in commands.entries() {
        let key = entry.command.to_lowercase();

        if key == input {
            return Some(CommandMatch {
                entry,
                rule: MatchRule::Exact,
            });
        }

        if key.starts_with(&input) {
            candidate = Some(CommandMatch {
                entry,
                rule: MatchRule::Prefix,
            });
        } else if input.contains(&leading_tokens(&key)) {
            candidate = Some(CommandMatch {
                entry,
                rule: MatchRule::TwoToken,
            });
        }
    }

    candidate
}

/// First two whitespace-separated words of `key`, joined by one space
fn leading_tokens(key: &str) -> String {
    key.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}
