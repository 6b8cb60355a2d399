//! Rough run-time estimate and JSON report for a compiled command.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Seconds assumed for a default scan
const BASE_SECONDS: f64 = 30.0;
/// Estimates never go below this
const MIN_SECONDS: f64 = 10.0;

static THREADS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--threads=(\d+)").expect("Invalid threads regex"));
static DELAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--delay=(\d+)").expect("Invalid delay regex"));

/// First numeric value of a `--flag=N` occurrence
fn first_value(pattern: &Regex, command: &str) -> Option<f64> {
    pattern
        .captures(command)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Estimate scan duration in seconds from the flags in a command.
///
/// Level 5 multiplies by five, risk 3 doubles, threads divide and each
/// second of delay adds ten. Only the first `--threads=`/`--delay=` counts.
pub fn estimate_test_time(command: &str) -> f64 {
    let mut seconds = BASE_SECONDS;

    if command.contains("--level=5") {
        seconds *= 5.0;
    }
    if command.contains("--risk=3") {
        seconds *= 2.0;
    }
    if let Some(threads) = first_value(&THREADS_PATTERN, command).filter(|t| *t > 0.0) {
        seconds /= threads;
    }
    if let Some(delay) = first_value(&DELAY_PATTERN, command) {
        seconds += delay * 10.0;
    }

    seconds.max(MIN_SECONDS)
}

/// Snapshot of a generated command for export
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub timestamp: DateTime<Utc>,
    pub command: String,
    pub estimated_time: f64,
    pub results: serde_json::Value,
}

impl ScanReport {
    pub fn new(command: &str, results: serde_json::Value) -> Self {
        Self {
            timestamp: Utc::now(),
            command: command.to_string(),
            estimated_time: estimate_test_time(command),
            results,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
