//! Lesson attendance records.
//!
//! A record carries the lesson window and the raw presence logs of the pupil
//! and the tutor, in the shape attendance exports use:
//!
//! ```json
//! {"lesson": [1594663200, 1594666800], "pupil": [...], "tutor": [...]}
//! ```

use serde::{Deserialize, Serialize};

use crate::overlap::{Overlap, compute_overlap, overlap_spans};
use crate::types::IntervalError;

/// Presence logs for one lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Lesson window as `[start, end]`.
    pub lesson: [i64; 2],

    /// Flat start/end list of pupil sessions.
    #[serde(default)]
    pub pupil: Vec<i64>,

    /// Flat start/end list of tutor sessions.
    #[serde(default)]
    pub tutor: Vec<i64>,
}

impl Lesson {
    const fn bounds(&self) -> (i64, i64) {
        (self.lesson[0], self.lesson[1])
    }

    /// Total time the pupil and the tutor were in the lesson together.
    pub fn appearance(&self) -> Result<u64, IntervalError> {
        compute_overlap(self.bounds(), &self.pupil, &self.tutor)
    }

    /// Total joint presence along with the stretches it happened in.
    pub fn co_presence(&self) -> Result<Overlap, IntervalError> {
        overlap_spans(self.bounds(), &self.pupil, &self.tutor)
    }
}
