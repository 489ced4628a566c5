//! Core type definitions for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a simulation run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every cell is dead
    Extinction,
    /// The grid did not change over one step
    PersistentState,
    /// A grid state recurred within the repeat threshold
    RepeatedPattern,
    /// The generation cap was hit without any other condition firing
    GenerationLimitReached,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Extinction => "extinction",
            StopReason::PersistentState => "persistent_state",
            StopReason::RepeatedPattern => "repeated_pattern",
            StopReason::GenerationLimitReached => "generation_limit_reached",
        }
    }

    pub fn all() -> [StopReason; 4] {
        [
            StopReason::Extinction,
            StopReason::PersistentState,
            StopReason::RepeatedPattern,
            StopReason::GenerationLimitReached,
        ]
    }

    /// Copy the reason text into a fixed-capacity byte field.
    ///
    /// The text is truncated to `buf.len()` bytes and a NUL terminator is
    /// written only if there is room left. Returns the number of text bytes
    /// copied.
    pub fn write_truncated(&self, buf: &mut [u8]) -> usize {
        let text = self.as_str().as_bytes();
        let n = text.len().min(buf.len());
        buf[..n].copy_from_slice(&text[..n]);
        if let Some(terminator) = buf.get_mut(n) {
            *terminator = 0;
        }
        n
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopReason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StopReason::all()
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("Unknown stop reason: {}", s)))
    }
}

/// Result of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Generations computed before the run stopped
    pub num_generations: u32,
    /// Total births over all computed generations
    pub score: u64,
    pub stop_reason: StopReason,
}

/// Request to run a simulation seeded from a word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    pub word: String,
}

impl GameRequest {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }

    /// Reject words that cannot seed a grid
    pub fn validate(&self) -> Result<()> {
        if self.word.is_empty() {
            return Err(Error::Validation(
                "Provided word should have at least one character".to_string(),
            ));
        }
        if !self.word.is_ascii() {
            return Err(Error::Validation(
                "Provided word should contain only ASCII characters".to_string(),
            ));
        }
        Ok(())
    }
}
