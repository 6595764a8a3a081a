//! Integration tests for ugps-logger.
//!
//! These tests verify the interaction between components:
//! - polling lifecycle against a mock device API
//! - session persistence on disk
//! - graceful shutdown and drain behavior

pub mod common;
