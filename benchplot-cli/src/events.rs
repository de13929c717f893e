//! Recorded Run Events
//!
//! A recorded run is a JSON-lines stream where every line is one completed
//! benchmark as the host runner reported it:
//!
//! ```text
//! {"browser": "Chrome 90", "result": {"suite": "Math", "name": "add", "hz": 1000.0, ...}}
//! ```

use anyhow::Context;
use benchplot_core::BenchmarkSample;
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// One completed benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    /// Browser that ran the benchmark
    pub browser: String,
    /// Reported result
    pub result: BenchmarkSample,
}

/// Read events from a JSON-lines stream, skipping blank lines
pub fn read_events(reader: impl BufRead) -> anyhow::Result<Vec<RunEvent>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let event: RunEvent = serde_json::from_str(&line)
            .with_context(|| format!("Invalid run event on line {}", idx + 1))?;
        events.push(event);
    }
    Ok(events)
}

/// Distinct browsers in first-seen order
pub fn browsers(events: &[RunEvent]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for event in events {
        if !seen.contains(&event.browser) {
            seen.push(event.browser.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: &str = r#"
{"browser": "Chrome", "result": {"suite": "Math", "name": "add", "hz": 10.0, "count": 1, "cycles": 1, "stats": {"mean": 0.1, "deviation": 0.0, "variance": 0.0, "moe": 0.0, "rme": 0.0, "sem": 0.0, "sample": [0.1, 0.1]}}}

{"browser": "Firefox", "result": {"suite": "Math", "name": "add", "hz": 5.0, "count": 1, "cycles": 1, "stats": {"mean": 0.2, "deviation": 0.0, "variance": 0.0, "moe": 0.0, "rme": 0.0, "sem": 0.0, "sample": [0.2, 0.2]}}}
{"browser": "Chrome", "result": {"suite": "Math", "name": "mul", "hz": 8.0, "count": 1, "cycles": 1, "stats": {"mean": 0.125, "deviation": 0.0, "variance": 0.0, "moe": 0.0, "rme": 0.0, "sem": 0.0, "sample": [0.125, 0.125]}}}
"#;

    #[test]
    fn test_read_events() {
        let events = read_events(EVENTS.as_bytes()).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].browser, "Firefox");
        assert_eq!(events[2].result.name, "mul");
        assert_eq!(browsers(&events), ["Chrome", "Firefox"]);
    }

    #[test]
    fn test_invalid_line_reports_position() {
        let err = read_events("\n{not json}\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
