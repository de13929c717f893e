//! Text Summary
//!
//! One line per browser/suite group, in the order groups were first reported:
//!
//! ```text
//! Math: "add" at 1000 ops/sec (2.00 x faster than "mul")
//! lonely benchmark had no peers for comparison at 333  ops/sec
//! ```
//!
//! Throughput is floored to whole ops/sec; the ratio keeps two decimals.

use benchplot_core::{Group, ResultSet};
use benchplot_stats::compare_fastest;

/// Render the summary lines for every group of a run
pub fn render_text_summary(results: &ResultSet) -> Vec<String> {
    results.groups().filter_map(render_group_line).collect()
}

/// Render the summary line of a single group.
///
/// Returns `None` for a group without samples.
pub fn render_group_line(group: Group<'_>) -> Option<String> {
    if let Some(cmp) = compare_fastest(group.samples) {
        return Some(format!(
            "{}: \"{}\" at {} ops/sec ({:.2} x faster than \"{}\")",
            cmp.fastest.suite,
            cmp.fastest.name,
            cmp.fastest.hz.floor(),
            cmp.times_faster,
            cmp.second.name
        ));
    }

    group.samples.first().map(|only| {
        format!(
            "{} had no peers for comparison at {}  ops/sec",
            only.description(),
            only.hz.floor()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchplot_core::{BenchmarkSample, SampleStats};

    fn sample(suite: &str, name: &str, hz: f64) -> BenchmarkSample {
        BenchmarkSample {
            suite: suite.to_string(),
            name: name.to_string(),
            description: None,
            hz,
            count: 1,
            cycles: 1,
            stats: SampleStats::default(),
        }
    }

    #[test]
    fn test_fastest_versus_runner_up() {
        let mut set = ResultSet::new();
        set.ingest("Chrome", sample("Math", "first", 1000.0));
        set.ingest("Chrome", sample("Math", "second", 500.0));
        set.ingest("Chrome", sample("Math", "third", 500.0));

        let lines = render_text_summary(&set);
        assert_eq!(
            lines,
            ["Math: \"first\" at 1000 ops/sec (2.00 x faster than \"second\")"]
        );
    }

    #[test]
    fn test_fastest_not_first_ingested() {
        let mut set = ResultSet::new();
        set.ingest("Chrome", sample("Math", "slow", 300.25));
        set.ingest("Chrome", sample("Math", "fast", 900.75));

        let lines = render_text_summary(&set);
        assert_eq!(
            lines,
            ["Math: \"fast\" at 900 ops/sec (3.00 x faster than \"slow\")"]
        );
    }

    #[test]
    fn test_no_peers() {
        let mut set = ResultSet::new();
        let mut alone = sample("Math", "alone", 333.7);
        alone.description = Some("Math alone".to_string());
        set.ingest("Chrome", alone);

        let lines = render_text_summary(&set);
        assert_eq!(
            lines,
            ["Math alone had no peers for comparison at 333  ops/sec"]
        );
    }

    #[test]
    fn test_ratio_rounding() {
        let mut set = ResultSet::new();
        set.ingest("Chrome", sample("Math", "a", 1000.0));
        set.ingest("Chrome", sample("Math", "b", 300.0));

        let lines = render_text_summary(&set);
        assert!(lines[0].contains("(3.33 x faster than \"b\")"));
    }

    #[test]
    fn test_group_order_follows_ingestion() {
        let mut set = ResultSet::new();
        set.ingest("Firefox", sample("Strings", "concat", 10.0));
        set.ingest("Chrome", sample("Math", "add", 5000.0));
        set.ingest("Chrome", sample("Math", "mul", 2500.0));

        let lines = render_text_summary(&set);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("concat had no peers"));
        assert!(lines[1].starts_with("Math: \"add\""));
    }

    #[test]
    fn test_empty_run() {
        assert!(render_text_summary(&ResultSet::new()).is_empty());
    }
}
