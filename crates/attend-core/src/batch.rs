//! Batch evaluation of lesson records against expected answers.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;
use crate::types::IntervalError;

/// A lesson record with an optional known answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCase {
    pub id: String,
    pub intervals: Lesson,
    #[serde(default)]
    pub answer: Option<u64>,
}

/// Result of evaluating one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub id: String,
    pub actual: Result<u64, IntervalError>,
    pub expected: Option<u64>,
}

/// How a computed result compares to the expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass { actual: u64 },
    Fail { expected: u64, actual: u64 },
    /// No answer was supplied to compare against.
    Unchecked { actual: u64 },
    Invalid(IntervalError),
}

impl CaseOutcome {
    pub fn verdict(&self) -> Verdict {
        match (&self.actual, self.expected) {
            (Err(err), _) => Verdict::Invalid(err.clone()),
            (Ok(actual), None) => Verdict::Unchecked { actual: *actual },
            (Ok(actual), Some(expected)) if *actual == expected => Verdict::Pass { actual: *actual },
            (Ok(actual), Some(expected)) => Verdict::Fail {
                expected,
                actual: *actual,
            },
        }
    }
}

/// Evaluates every case in parallel, keeping input order.
pub fn evaluate_cases(cases: &[LessonCase]) -> Vec<CaseOutcome> {
    let outcomes: Vec<CaseOutcome> = cases
        .par_iter()
        .map(|case| {
            let actual = case.intervals.appearance();
            if let Err(err) = &actual {
                tracing::warn!(id = %case.id, error = %err, "rejecting malformed lesson");
            }
            CaseOutcome {
                id: case.id.clone(),
                actual,
                expected: case.answer,
            }
        })
        .collect();

    tracing::debug!(cases = outcomes.len(), "evaluated lesson cases");
    outcomes
}

/// Verdict counts across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub invalid: usize,
    pub unchecked: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[CaseOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                summary.total += 1;
                match outcome.verdict() {
                    Verdict::Pass { .. } => summary.passed += 1,
                    Verdict::Fail { .. } => summary.failed += 1,
                    Verdict::Invalid(_) => summary.invalid += 1,
                    Verdict::Unchecked { .. } => summary.unchecked += 1,
                }
                summary
            })
    }

    /// True when nothing failed and nothing was rejected.
    pub const fn all_ok(&self) -> bool {
        self.failed == 0 && self.invalid == 0
    }
}
