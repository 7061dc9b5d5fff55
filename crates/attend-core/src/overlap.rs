//! Co-presence overlap calculation.
//!
//! # Algorithm Summary
//!
//! 1. Clip every session of both participants to the lesson window
//! 2. Turn each clipped session into a start event and an end event
//! 3. Sort events by time, ends before starts at the same instant
//! 4. Sweep once, keeping an open-session counter per participant and
//!    accumulating elapsed time whenever both counters are positive
//!
//! Counters instead of flags let overlapping sessions of one participant
//! (two devices logged in at once) merge into a single present stretch.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{Bounds, IntervalError, Participant, Span, parse_pairs};

/// Whether an event opens or closes a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delta {
    End,
    Start,
}

impl Delta {
    const fn sign(self) -> i64 {
        match self {
            Self::End => -1,
            Self::Start => 1,
        }
    }
}

/// A session boundary, only alive for the duration of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Event {
    time: i64,
    delta: Delta,
    participant: Participant,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // At the same instant ends come first, so touching sessions never overlap.
        self.time
            .cmp(&other.time)
            .then_with(|| self.delta.sign().cmp(&other.delta.sign()))
            .then_with(|| self.participant.cmp(&other.participant))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Number of currently open sessions per participant.
///
/// A counter may dip below zero between events sharing one timestamp (a
/// zero-length session ends before it starts). No time elapses inside a
/// single instant, so only the settled value matters.
#[derive(Debug, Default)]
struct Activity {
    pupil: i64,
    tutor: i64,
}

impl Activity {
    fn apply(&mut self, event: &Event) {
        let counter = match event.participant {
            Participant::Pupil => &mut self.pupil,
            Participant::Tutor => &mut self.tutor,
        };
        *counter += event.delta.sign();
    }

    const fn both_present(&self) -> bool {
        self.pupil > 0 && self.tutor > 0
    }
}

/// Result of a sweep: total co-presence plus where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlap {
    /// Total time both participants were present, in input units.
    pub total: u64,

    /// Co-presence stretches in time order, non-empty and with adjacent
    /// stretches merged.
    pub spans: Vec<Span>,
}

/// Total time both participants are present inside the lesson window.
///
/// `pupil` and `tutor` are flat `[start, end, start, end, ...]` lists in the
/// same units as `bounds`. They may be unsorted, overlapping or empty.
///
/// # Errors
///
/// Returns [`IntervalError`] if the window is reversed, a list has odd
/// length, or any pair ends before it starts.
pub fn compute_overlap(
    bounds: (i64, i64),
    pupil: &[i64],
    tutor: &[i64],
) -> Result<u64, IntervalError> {
    overlap_spans(bounds, pupil, tutor).map(|overlap| overlap.total)
}

/// Like [`compute_overlap`], but also reports the co-presence stretches.
pub fn overlap_spans(
    bounds: (i64, i64),
    pupil: &[i64],
    tutor: &[i64],
) -> Result<Overlap, IntervalError> {
    let bounds = Bounds::try_from(bounds)?;
    let pupil = parse_pairs(pupil, Participant::Pupil)?;
    let tutor = parse_pairs(tutor, Participant::Tutor)?;
    Ok(sweep(bounds, &pupil, &tutor))
}

/// Runs the event sweep over already validated sessions.
fn sweep(bounds: Bounds, pupil: &[Span], tutor: &[Span]) -> Overlap {
    let mut events = Vec::with_capacity(2 * (pupil.len() + tutor.len()));
    for (participant, sessions) in [(Participant::Pupil, pupil), (Participant::Tutor, tutor)] {
        for session in sessions {
            let clipped = session.clip(bounds);
            events.push(Event {
                time: clipped.start,
                delta: Delta::Start,
                participant,
            });
            events.push(Event {
                time: clipped.end,
                delta: Delta::End,
                participant,
            });
        }
    }
    events.sort_unstable();

    let mut activity = Activity::default();
    let mut last_time = bounds.start();
    let mut total = 0_u64;
    let mut spans: Vec<Span> = Vec::new();

    for event in &events {
        if activity.both_present() && event.time > last_time {
            total += event.time.abs_diff(last_time);
            match spans.last_mut() {
                Some(previous) if previous.end == last_time => previous.end = event.time,
                _ => spans.push(Span {
                    start: last_time,
                    end: event.time,
                }),
            }
        }

        activity.apply(event);
        last_time = event.time;
        tracing::trace!(?event, ?activity, total, "applied event");
    }

    tracing::debug!(
        events = events.len(),
        spans = spans.len(),
        total,
        "overlap sweep finished"
    );

    Overlap { total, spans }
}
