//! Check command for evaluating a file of lesson cases.
//!
//! This module implements `attend check <FILE>`, which loads a JSON array of
//! `{id, intervals, answer}` cases, computes each lesson's overlap, and compares
//! it with the recorded answer.

use std::fmt::Write as _;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use attend_core::{CaseOutcome, LessonCase, Summary, Verdict, evaluate_cases};
use serde::Serialize;

/// Reads cases from a file, or from stdin when the path is `-`.
pub fn load_cases(path: &Path) -> Result<Vec<LessonCase>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read lesson cases from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse lesson cases from {}", path.display()))
}

/// Evaluates cases, on a dedicated pool when a thread count is configured.
pub fn evaluate(cases: &[LessonCase], threads: Option<usize>) -> Result<Vec<CaseOutcome>> {
    let Some(threads) = threads else {
        return Ok(evaluate_cases(cases));
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("failed to build worker pool")?;
    tracing::debug!(threads, "evaluating on dedicated pool");
    Ok(pool.install(|| evaluate_cases(cases)))
}

// ========== Human-Readable Output ==========

/// Formats outcomes and their summary for human-readable output.
pub fn format_outcomes(outcomes: &[CaseOutcome], summary: &Summary) -> String {
    let mut output = String::new();

    let id_width = outcomes.iter().map(|o| o.id.len()).max().unwrap_or(0);
    for outcome in outcomes {
        let (status, detail) = match outcome.verdict() {
            Verdict::Pass { actual } => ("PASS", actual.to_string()),
            Verdict::Fail { expected, actual } => {
                ("FAIL", format!("got {actual}, expected {expected}"))
            }
            Verdict::Unchecked { actual } => ("UNCHECKED", actual.to_string()),
            Verdict::Invalid(err) => ("INVALID", err.to_string()),
        };
        writeln!(
            output,
            "{status:<9}  {:<id_width$}  {detail}",
            outcome.id
        )
        .unwrap();
    }

    if !outcomes.is_empty() {
        writeln!(output).unwrap();
    }
    writeln!(
        output,
        "{} cases: {} passed, {} failed, {} invalid, {} unchecked",
        summary.total, summary.passed, summary.failed, summary.invalid, summary.unchecked
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

#[derive(Serialize)]
struct JsonCase<'a> {
    id: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    actual: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    cases: Vec<JsonCase<'a>>,
    summary: &'a Summary,
}

/// Formats outcomes and their summary as JSON.
pub fn format_outcomes_json(outcomes: &[CaseOutcome], summary: &Summary) -> Result<String> {
    let cases = outcomes
        .iter()
        .map(|outcome| {
            let status = match outcome.verdict() {
                Verdict::Pass { .. } => "pass",
                Verdict::Fail { .. } => "fail",
                Verdict::Unchecked { .. } => "unchecked",
                Verdict::Invalid(_) => "invalid",
            };
            JsonCase {
                id: &outcome.id,
                status,
                actual: outcome.actual.as_ref().ok().copied(),
                expected: outcome.expected,
                error: outcome.actual.as_ref().err().map(ToString::to_string),
            }
        })
        .collect();

    let report = JsonReport { cases, summary };
    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the check command.
///
/// Fails after printing the report if any case failed or was malformed.
pub fn run<W: Write>(
    writer: &mut W,
    path: &Path,
    json: bool,
    threads: Option<usize>,
) -> Result<()> {
    let cases = load_cases(path)?;
    tracing::debug!(path = %path.display(), cases = cases.len(), "loaded lesson cases");

    let outcomes = evaluate(&cases, threads)?;
    let summary = Summary::from_outcomes(&outcomes);

    if json {
        writeln!(writer, "{}", format_outcomes_json(&outcomes, &summary)?)?;
    } else {
        write!(writer, "{}", format_outcomes(&outcomes, &summary))?;
    }

    if !summary.all_ok() {
        bail!(
            "{} of {} cases did not pass",
            summary.failed + summary.invalid,
            summary.total
        );
    }

    Ok(())
}
