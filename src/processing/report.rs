//! # Run Reports
//!
//! What an encode or decode session did with each plane, how it ended, and the
//! non-fatal diagnostic raised when planes ran out. Reports serialize to JSON for
//! `--report`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::processing::bit_plane::BitPlane;

/// Terminal state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// Whole message placed, or terminator found
    Done,
    /// Every plane was used without finishing; the result is best-effort
    ExhaustedIncomplete,
}

/// Non-fatal conditions. They never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The message did not fit in three planes; only a prefix was embedded.
    CapacityExceeded { unplaced_bits: usize },
    /// No terminator in any of the three planes.
    SentinelNotFound,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::CapacityExceeded { unplaced_bits } => write!(
                f,
                "3 bit planes were not enough for the entire message, {} bits left out",
                unplaced_bits
            ),
            Diagnostic::SentinelNotFound => write!(
                f,
                "end of message not found in the 3 allowed bit planes: message likely exceeds 3-plane capacity or was never terminated"
            ),
        }
    }
}

/// Use of one plane during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneUsage {
    pub plane: BitPlane,
    pub capacity_bits: usize,
    /// Message bits written to (encode) or recovered from (decode) this plane
    pub message_bits: usize,
    pub fill_percent: f64,
}

impl PlaneUsage {
    pub fn new(plane: BitPlane, capacity_bits: usize, message_bits: usize) -> Self {
        let fill_percent = if capacity_bits == 0 {
            0.0
        } else {
            message_bits as f64 / capacity_bits as f64 * 100.0
        };

        Self {
            plane,
            capacity_bits,
            message_bits,
            fill_percent,
        }
    }

    pub fn is_full(&self) -> bool {
        self.message_bits == self.capacity_bits
    }
}

/// Summary of an encode session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedReport {
    /// Length of the encoded message, terminator included
    pub message_bits: usize,
    pub planes: Vec<PlaneUsage>,
    pub completion: Completion,
    pub diagnostic: Option<Diagnostic>,
}

impl EmbedReport {
    pub fn embedded_bits(&self) -> usize {
        self.planes.iter().map(|p| p.message_bits).sum()
    }

    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        write_json(self, path)
    }
}

impl fmt::Display for EmbedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "embedded {}/{} message bits",
            self.embedded_bits(),
            self.message_bits
        )?;
        for usage in &self.planes {
            write!(f, "; plane {} {:.1}% full", usage.plane, usage.fill_percent)?;
        }
        Ok(())
    }
}

/// Summary of a decode session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractReport {
    pub recovered_bits: usize,
    pub planes: Vec<PlaneUsage>,
    /// Plane the terminator was found in
    pub terminator_plane: Option<BitPlane>,
    pub completion: Completion,
    pub diagnostic: Option<Diagnostic>,
}

impl ExtractReport {
    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        write_json(self, path)
    }
}

impl fmt::Display for ExtractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recovered {} message bits", self.recovered_bits)?;
        match self.terminator_plane {
            Some(plane) => write!(f, ", end of message in plane {}", plane),
            None => write!(f, ", no end of message"),
        }
    }
}

fn write_json<T: Serialize, P: AsRef<Path>>(report: &T, path: P) -> std::io::Result<()> {
    let json_string = serde_json::to_string_pretty(report)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;

    Ok(())
}
