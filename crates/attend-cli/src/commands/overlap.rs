//! Overlap command for a single lesson given on the command line.
//!
//! This module implements `attend overlap --lesson S,E --pupil ... --tutor ...`
//! with human-readable and JSON output.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::{Context, Result, bail};
use attend_core::{Overlap, Span, overlap_spans};
use serde::Serialize;

/// Formats a number of seconds as a duration string.
/// Returns "Xh Ym Zs" if >= 1 hour, "Ym Zs" if >= 1 minute, "Zs" otherwise.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let secs = seconds % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes >= 1 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Formats an overlap for human-readable output.
pub fn format_overlap(overlap: &Overlap, show_spans: bool) -> String {
    let mut output = String::new();

    if overlap.total >= 60 {
        writeln!(
            output,
            "Overlap: {}s ({})",
            overlap.total,
            format_duration(overlap.total)
        )
        .unwrap();
    } else {
        writeln!(output, "Overlap: {}s", overlap.total).unwrap();
    }

    if show_spans {
        if overlap.spans.is_empty() {
            writeln!(output, "No joint presence.").unwrap();
        }
        for span in &overlap.spans {
            writeln!(
                output,
                "  [{}, {})  {}s",
                span.start,
                span.end,
                span.duration()
            )
            .unwrap();
        }
    }

    output
}

#[derive(Serialize)]
struct JsonOverlap<'a> {
    total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    spans: Option<&'a [Span]>,
}

/// Formats an overlap as JSON.
pub fn format_overlap_json(overlap: &Overlap, show_spans: bool) -> Result<String> {
    let report = JsonOverlap {
        total: overlap.total,
        spans: show_spans.then_some(overlap.spans.as_slice()),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Runs the overlap command.
pub fn run<W: Write>(
    writer: &mut W,
    lesson: &[i64],
    pupil: &[i64],
    tutor: &[i64],
    show_spans: bool,
    json: bool,
) -> Result<()> {
    let &[start, end] = lesson else {
        bail!(
            "--lesson takes exactly two values (START,END), got {}",
            lesson.len()
        );
    };

    let overlap =
        overlap_spans((start, end), pupil, tutor).context("cannot compute lesson overlap")?;
    tracing::debug!(total = overlap.total, "computed lesson overlap");

    if json {
        writeln!(writer, "{}", format_overlap_json(&overlap, show_spans)?)?;
    } else {
        write!(writer, "{}", format_overlap(&overlap, show_spans))?;
    }

    Ok(())
}
