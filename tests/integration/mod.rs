//! Integration tests for pipeline-sim
//!
//! These tests verify that multiple components work together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod console_flow;
pub mod progress_flow;
