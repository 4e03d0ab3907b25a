//! Shared test utilities for pipeline-sim
//!
//! This module provides common helpers for integration tests:
//! - Deterministic environment setup
//! - Simulator fixtures that play sessions into an in-memory log
//! - Binary invocation against a throwaway data directory

pub mod determinism;
