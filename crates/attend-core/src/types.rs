//! Interval types shared by the overlap sweep and lesson records.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised for malformed interval input.
///
/// Every variant is a caller bug: the calculator refuses to produce a result
/// rather than guessing what the input meant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// The bounding window ends before it starts.
    #[error("lesson window cannot end before it starts: [{start}, {end}]")]
    InvalidBounds { start: i64, end: i64 },

    /// A raw interval list does not split into start/end pairs.
    #[error("{participant} intervals must come in start/end pairs, got {len} values")]
    OddLength { participant: Participant, len: usize },

    /// A start/end pair is reversed.
    #[error("interval cannot end before it starts: {participant} pair #{index} is [{start}, {end}]")]
    Reversed {
        participant: Participant,
        index: usize,
        start: i64,
        end: i64,
    },
}

/// One of the two people whose presence is compared.
///
/// The calculator is fixed at exactly two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    Pupil,
    Tutor,
}

impl Participant {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pupil => "pupil",
            Self::Tutor => "tutor",
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A closed-open stretch of time `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    /// Length of the span in input units.
    ///
    /// Spans are never reversed once built, so this cannot underflow.
    pub const fn duration(&self) -> u64 {
        self.end.abs_diff(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamps both ends into the window.
    ///
    /// A span lying entirely outside collapses to the nearer boundary.
    #[must_use]
    pub fn clip(self, bounds: Bounds) -> Self {
        Self {
            start: self.start.clamp(bounds.start(), bounds.end()),
            end: self.end.clamp(bounds.start(), bounds.end()),
        }
    }
}

/// The validated lesson window all activity is clipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Bounds {
    start: i64,
    end: i64,
}

impl Bounds {
    /// Creates a window after checking `start <= end`.
    pub const fn new(start: i64, end: i64) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::InvalidBounds { start, end });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> i64 {
        self.start
    }

    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Width of the window, the upper limit for any overlap.
    pub const fn width(&self) -> u64 {
        self.end.abs_diff(self.start)
    }
}

impl TryFrom<(i64, i64)> for Bounds {
    type Error = IntervalError;

    fn try_from((start, end): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

/// Splits a flat `[s0, e0, s1, e1, ...]` list into validated spans.
pub fn parse_pairs(raw: &[i64], participant: Participant) -> Result<Vec<Span>, IntervalError> {
    if raw.len() % 2 != 0 {
        return Err(IntervalError::OddLength {
            participant,
            len: raw.len(),
        });
    }

    raw.chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| {
            let (start, end) = (pair[0], pair[1]);
            if start > end {
                return Err(IntervalError::Reversed {
                    participant,
                    index,
                    start,
                    end,
                });
            }
            Ok(Span { start, end })
        })
        .collect()
}
