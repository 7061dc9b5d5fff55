//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lesson attendance overlap calculator.
///
/// Computes how long a pupil and a tutor were present in a lesson at the
/// same time, from their raw session logs.
#[derive(Debug, Parser)]
#[command(name = "attend", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute joint presence for a single lesson.
    Overlap {
        /// Lesson window as START,END.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        lesson: Vec<i64>,

        /// Pupil sessions as START,END[,START,END...].
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        pupil: Vec<i64>,

        /// Tutor sessions as START,END[,START,END...].
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        tutor: Vec<i64>,

        /// List the stretches where both were present.
        #[arg(long)]
        spans: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a JSON file of lesson cases against their answers.
    Check {
        /// Path to a JSON array of cases, or `-` to read stdin.
        path: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
