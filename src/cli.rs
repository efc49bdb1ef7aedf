//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use drag_quiz::core::QuizSettings;
use drag_quiz::types::{InputModality, SAMPLE_SIZE};

/// Drag-and-drop ordering quiz for the terminal
#[derive(Debug, Parser)]
#[command(name = "drag-quiz", version)]
#[command(about = "Drag answer fragments into their slots, in order", long_about = None)]
pub struct Cli {
    /// Question document: JSON object of tiers, each a list of question records
    #[arg(long, default_value = "questions.json")]
    pub questions: PathBuf,

    /// Questions drawn per session
    #[arg(long, default_value_t = SAMPLE_SIZE, value_parser = parse_sample_size)]
    pub sample_size: usize,

    /// Seed for the question draw (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// How drags are interpreted
    #[arg(long, value_enum, default_value_t = InputArg::Pointer)]
    pub input: InputArg,

    /// Write JSON logs to daily files in this directory (logging is off otherwise)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputArg {
    /// Mouse drag; the fragment follows the cursor
    Pointer,
    /// Touch-style drag; the fragment keeps the grab offset
    Touch,
}

impl From<InputArg> for InputModality {
    fn from(arg: InputArg) -> Self {
        match arg {
            InputArg::Pointer => InputModality::Pointer,
            InputArg::Touch => InputModality::Touch,
        }
    }
}

impl Cli {
    pub fn settings(&self) -> QuizSettings {
        QuizSettings {
            sample_size: self.sample_size,
            seed: self.seed,
        }
    }
}

fn parse_sample_size(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    if n == 0 {
        return Err("sample size must be at least 1".to_string());
    }
    Ok(n)
}
