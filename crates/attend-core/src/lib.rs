//! Core logic for lesson attendance overlap.
//!
//! This crate contains:
//! - Overlap: event sweep computing how long two participants are present together
//! - Lessons: the `{lesson, pupil, tutor}` attendance record
//! - Batch: parallel evaluation of many records against known answers

pub mod batch;
pub mod lesson;
mod overlap;
pub mod types;

pub use batch::{CaseOutcome, LessonCase, Summary, Verdict, evaluate_cases};
pub use lesson::Lesson;
pub use overlap::{Overlap, compute_overlap, overlap_spans};
pub use types::{Bounds, IntervalError, Participant, Span};
