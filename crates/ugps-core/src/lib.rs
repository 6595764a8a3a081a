//! Core domain types for the UGPS position logger.
//!
//! This crate provides the fundamental types used throughout the logger:
//! - `PositionKind`: the three positioning subsystems of the device
//! - `AcousticFix`, `GeoFix`, `PositionFix`: decoded position payloads
//! - `Reading`: one timestamped sample (or failure marker) for one kind

pub mod error;
pub mod position;
pub mod reading;

pub use error::{CoreError, Result};
pub use position::{AcousticFix, GeoFix, PositionFix, PositionKind};
pub use reading::{format_timestamp, Reading, TIMESTAMP_FORMAT};
