//! Installer output parsing
//!
//! Two shapes of output are understood:
//! - a JSON object carrying a numeric `cycles` field (the default)
//! - a free-text rejection message such as
//!   `... requires 2_000_000 cycles` reported when a call is made with
//!   insufficient cycles

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::MeasureError;

/// Cycle amounts as charged by the host
pub type Cycles = u128;

/// Which parser to apply to the installer's stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CyclesFormat {
    #[default]
    Json,
    Message,
}

impl CyclesFormat {
    pub fn parse(self, output: &str) -> Result<Cycles, MeasureError> {
        match self {
            Self::Json => parse_cycles(output),
            Self::Message => parse_required_cycles(output),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InstallOutput {
    cycles: Cycles,
}

/// Extract the `cycles` field from a JSON object
pub fn parse_cycles(output: &str) -> Result<Cycles, MeasureError> {
    let output = output.trim();
    if !output.starts_with('{') {
        return Err(MeasureError::Parse("expected a JSON object".to_string()));
    }

    serde_json::from_str::<InstallOutput>(output)
        .map(|parsed| parsed.cycles)
        .map_err(|e| MeasureError::Parse(e.to_string()))
}

fn cycles_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d[\d_]*) cycles?\b").expect("valid cycles regex"))
}

/// Extract the first `<n> cycles` amount from a free-text message
///
/// Digit groups separated by underscores (`2_000_000`) are accepted.
pub fn parse_required_cycles(message: &str) -> Result<Cycles, MeasureError> {
    let captures = cycles_pattern().captures(message).ok_or_else(|| {
        MeasureError::Parse(format!(
            "no cycle amount found in message: {}",
            message.trim()
        ))
    })?;

    let digits: String = captures[1].chars().filter(|c| *c != '_').collect();
    digits
        .parse::<Cycles>()
        .map_err(|e| MeasureError::Parse(format!("cycle amount {} out of range: {}", &captures[1], e)))
}
