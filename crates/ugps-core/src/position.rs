//! Position kinds and decoded position payloads.
//!
//! The Underwater GPS exposes three independent positioning subsystems,
//! each with its own endpoint and coordinate schema. `PositionKind` is the
//! primary key for routing readings through the pipeline and into the
//! per-kind output files.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the device's positioning subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionKind {
    /// Acoustic position relative to the receiver array (x/y/z meters).
    Acoustic,
    /// Global GNSS-referenced position (lat/lon degrees).
    Global,
    /// Master electronics GNSS position (lat/lon degrees).
    Master,
}

impl PositionKind {
    /// All kinds in poll order. One poller is spawned per entry.
    pub const ALL: [PositionKind; 3] = [Self::Acoustic, Self::Global, Self::Master];

    /// REST path for this kind on the device API.
    pub fn api_path(&self) -> &'static str {
        match self {
            Self::Acoustic => "/api/v1/position/acoustic/filtered",
            Self::Global => "/api/v1/position/global",
            Self::Master => "/api/v1/position/master",
        }
    }

    /// Output file name inside the session directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Acoustic => "acoustic_position.txt",
            Self::Global => "global_position.txt",
            Self::Master => "master_position.txt",
        }
    }

    /// CSV header row for this kind's output file.
    pub fn csv_header(&self) -> &'static str {
        match self {
            Self::Acoustic => "t,x,y,z",
            Self::Global | Self::Master => "t,lat,lon",
        }
    }

    /// Stable lowercase label, used for metric labels and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Acoustic => "acoustic",
            Self::Global => "global",
            Self::Master => "master",
        }
    }
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PositionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "acoustic" => Ok(Self::Acoustic),
            "global" => Ok(Self::Global),
            "master" => Ok(Self::Master),
            other => Err(CoreError::UnknownKind(other.to_string())),
        }
    }
}

/// Acoustic position relative to the receiver array, in meters.
///
/// The device reports additional fields (std, receiver status); only the
/// coordinates are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticFix {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// GNSS-referenced position in decimal degrees.
///
/// Shared by the global and master endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    pub lat: f64,
    pub lon: f64,
}

/// A decoded position payload of either schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionFix {
    Acoustic(AcousticFix),
    Geo(GeoFix),
}

impl PositionFix {
    /// CSV field portion of an output row (without the timestamp).
    pub fn csv_fields(&self) -> String {
        match self {
            Self::Acoustic(fix) => format!("{},{},{}", fix.x, fix.y, fix.z),
            Self::Geo(fix) => format!("{},{}", fix.lat, fix.lon),
        }
    }
}

impl From<AcousticFix> for PositionFix {
    fn from(fix: AcousticFix) -> Self {
        Self::Acoustic(fix)
    }
}

impl From<GeoFix> for PositionFix {
    fn from(fix: GeoFix) -> Self {
        Self::Geo(fix)
    }
}

impl fmt::Display for PositionFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Acoustic(fix) => write!(f, "x={} y={} z={}", fix.x, fix.y, fix.z),
            Self::Geo(fix) => write!(f, "lat={} lon={}", fix.lat, fix.lon),
        }
    }
}
