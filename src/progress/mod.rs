//! Challenge completion, score and rank
//!
//! State lives in an explicit [`Progress`] value; persistence is injected
//! through [`ProgressStore`].

mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::{JsonFileStore, MemoryStore, ProgressStore};

/// Number of challenges in the pipeline
pub const CHALLENGE_COUNT: u8 = 6;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Unknown challenge {0} (expected 1-6)")]
    UnknownChallenge(u8),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode progress: {0}")]
    Json(#[from] serde_json::Error),
}

/// Points awarded for completing `challenge`
pub fn points_for(challenge: u8) -> Option<u32> {
    match challenge {
        1 => Some(100),
        2 => Some(150),
        3 => Some(200),
        4 => Some(250),
        5 => Some(300),
        6 => Some(350),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub min_score: u32,
    pub icon: &'static str,
    pub title: &'static str,
}

/// Rank ladder, lowest first
pub const RANKS: [Rank; 6] = [
    Rank { min_score: 0, icon: "🌱", title: "Beginner" },
    Rank { min_score: 100, icon: "🌿", title: "Explorer" },
    Rank { min_score: 250, icon: "⚡", title: "Builder" },
    Rank { min_score: 450, icon: "🔥", title: "Engineer" },
    Rank { min_score: 700, icon: "💎", title: "DevOps Pro" },
    Rank { min_score: 1000, icon: "🏆", title: "Champion" },
];

/// Highest rank whose threshold does not exceed `score`
pub fn rank_for(score: u32) -> Rank {
    RANKS
        .iter()
        .rev()
        .find(|r| score >= r.min_score)
        .copied()
        .unwrap_or(RANKS[0])
}

/// Persisted progress snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Completed challenges in completion order
    pub completed: Vec<u8>,
    pub score: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProgressState {
    /// Drop unknown or repeated challenges and recompute the score
    fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.completed.len());
        for n in self.completed.drain(..) {
            if points_for(n).is_some() && !seen.contains(&n) {
                seen.push(n);
            } else {
                tracing::warn!(challenge = n, "Dropping invalid completed challenge");
            }
        }
        let score = seen.iter().filter_map(|n| points_for(*n)).sum();
        if score != self.score {
            tracing::warn!(stored = self.score, computed = score, "Stored score out of sync");
        }
        Self {
            completed: seen,
            score,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    AlreadyCompleted,
    Completed {
        points: u32,
        /// Challenge unlocked by this completion
        unlocked: Option<u8>,
        /// All challenges are now complete
        finished: bool,
    },
}

/// Progress through the challenge sequence
pub struct Progress<S: ProgressStore> {
    state: ProgressState,
    store: S,
}

impl<S: ProgressStore> Progress<S> {
    /// Load saved progress from `store`
    pub fn open(store: S) -> Result<Self, ProgressError> {
        let state = store.load()?.normalized();
        Ok(Self { state, store })
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mark `challenge` complete; repeated calls are no-ops
    pub fn complete(&mut self, challenge: u8) -> Result<CompletionOutcome, ProgressError> {
        let points = points_for(challenge).ok_or(ProgressError::UnknownChallenge(challenge))?;
        if self.is_completed(challenge) {
            return Ok(CompletionOutcome::AlreadyCompleted);
        }

        self.state.completed.push(challenge);
        self.state.score += points;
        self.state.updated_at = Some(Utc::now());
        self.store.save(&self.state)?;

        tracing::info!(challenge, points, score = self.state.score, "Challenge completed");

        Ok(CompletionOutcome::Completed {
            points,
            unlocked: (challenge < CHALLENGE_COUNT).then_some(challenge + 1),
            finished: self.is_finished(),
        })
    }

    pub fn is_completed(&self, challenge: u8) -> bool {
        self.state.completed.contains(&challenge)
    }

    /// Challenge 1 is always open; later ones open when their predecessor is
    /// complete
    pub fn is_unlocked(&self, challenge: u8) -> bool {
        match challenge {
            1 => true,
            n if n <= CHALLENGE_COUNT && n > 1 => {
                self.is_completed(n - 1) || self.is_completed(n)
            }
            _ => false,
        }
    }

    /// The challenge the pipeline view highlights as current
    pub fn active_challenge(&self) -> Option<u8> {
        let next = self.completed_count() as u8 + 1;
        (next <= CHALLENGE_COUNT && !self.is_completed(next)).then_some(next)
    }

    pub fn completed_count(&self) -> usize {
        self.state.completed.len()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Completion percentage, rounded
    pub fn percent(&self) -> u32 {
        (self.completed_count() as f64 / CHALLENGE_COUNT as f64 * 100.0).round() as u32
    }

    pub fn rank(&self) -> Rank {
        rank_for(self.state.score)
    }

    pub fn is_finished(&self) -> bool {
        self.completed_count() == CHALLENGE_COUNT as usize
    }

    /// Forget all progress
    pub fn reset(&mut self) -> Result<(), ProgressError> {
        self.state = ProgressState::default();
        self.store.clear()
    }
}
