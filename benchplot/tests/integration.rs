//! Integration tests for Benchplot
//!
//! These tests verify the end-to-end behavior from ingested samples to the
//! JSON export, text summary, chart spec and chart submissions.

use benchplot::{
    AggregateError, BenchmarkSample, ChartOptions, ChartService, ChartSubmission,
    DuplicatePolicy, Reporter, ReporterConfig, ReporterHooks, ResultSet, ResultsDocument,
    SampleStats, StatsError, SubmissionError, build_chart_spec, compute_rate_deviation, flatten,
    generate_json_report, longest_label_len, parse_json_report, render_text_summary,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn sample(suite: &str, name: &str, hz: f64) -> BenchmarkSample {
    let t = 1.0 / hz;
    BenchmarkSample {
        suite: suite.to_string(),
        name: name.to_string(),
        description: None,
        hz,
        count: 20,
        cycles: 4,
        stats: SampleStats {
            mean: t,
            deviation: t * 0.01,
            variance: (t * 0.01).powi(2),
            moe: t * 0.002,
            rme: 0.2,
            sem: t * 0.001,
            sample: vec![t, t * 1.01, t * 0.99, t * 1.005],
        },
    }
}

fn cross_browser_run() -> ResultSet {
    let mut set = ResultSet::new();
    set.ingest("Chrome 90", sample("Math Suite", "add", 1000.0));
    set.ingest("Chrome 90", sample("Math Suite", "mul", 500.0));
    set.ingest("Chrome 90", sample("Math Suite", "div", 500.0));
    set.ingest("Chrome 90", sample("Strings", "concat", 333.7));
    set.ingest("Firefox 88", sample("Math Suite", "add", 750.0));
    set.ingest("Firefox 88", sample("Math Suite", "mul", 250.0));
    set
}

/// Flattened records are sorted fastest-first with stable ties
#[test]
fn test_flatten_orders_by_throughput() {
    let records = flatten(&cross_browser_run(), DuplicatePolicy::Abort).unwrap();

    assert_eq!(records.len(), 6);
    assert!(records.windows(2).all(|w| w[0].hz >= w[1].hz));

    let order: Vec<_> = records.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(
        order,
        [
            "Math_Suite-add-Chrome_90",
            "Math_Suite-add-Firefox_88",
            "Math_Suite-mul-Chrome_90",
            "Math_Suite-div-Chrome_90",
            "Strings-concat-Chrome_90",
            "Math_Suite-mul-Firefox_88",
        ]
    );
}

/// The same benchmark reported twice for a browser is a fatal error
#[test]
fn test_duplicate_run_detected() {
    let mut set = ResultSet::new();
    set.ingest("Chrome 90", sample("Math Suite", "add", 100.0));
    set.ingest("Chrome 90", sample("Math Suite", "add", 100.0));

    assert!(matches!(
        flatten(&set, DuplicatePolicy::Abort),
        Err(AggregateError::DuplicateRun { key }) if key == "Math_Suite-add-Chrome_90"
    ));
}

/// Text summary follows ingestion order and formats each group
#[test]
fn test_text_summary() {
    let lines = render_text_summary(&cross_browser_run());

    assert_eq!(
        lines,
        [
            "Math Suite: \"add\" at 1000 ops/sec (2.00 x faster than \"mul\")",
            "concat had no peers for comparison at 333  ops/sec",
            "Math Suite: \"add\" at 750 ops/sec (3.00 x faster than \"mul\")",
        ]
    );
}

/// JSON export round-trips names and exact throughput values
#[test]
fn test_json_round_trip() {
    let mut set = cross_browser_run();
    set.ingest("Safari 14", sample("Math Suite", "add", 0.1 + 0.2));
    let records = flatten(&set, DuplicatePolicy::Abort).unwrap();
    let doc = ResultsDocument::new(records);

    let value = serde_json::to_value(&doc).unwrap();
    let json = generate_json_report(&value).unwrap();
    let parsed = parse_json_report(&json).unwrap();

    let expected: HashMap<_, _> = doc.runs.iter().map(|r| (r.full_name.clone(), r.hz)).collect();
    let actual: HashMap<_, _> = parsed
        .runs
        .iter()
        .map(|r| (r.full_name.clone(), r.hz))
        .collect();
    assert_eq!(actual, expected);
}

/// Chart has one bar per record and a margin fitted to the longest label
#[test]
fn test_chart_spec() {
    let records = flatten(&cross_browser_run(), DuplicatePolicy::Abort).unwrap();
    let figure = build_chart_spec(&records, &ChartOptions::default());

    assert_eq!(figure.data.len(), records.len());
    // "Math Suite" and "Firefox 88" are the longest strings (10 chars)
    assert_eq!(longest_label_len(&records), 10);
    assert_eq!(figure.layout.margin.l, 120);
    assert_eq!(figure.data[0].x, [1000.0]);

    for (trace, record) in figure.data.iter().zip(&records) {
        assert_eq!(
            trace.error_x.array,
            [compute_rate_deviation(&record.sample).unwrap()]
        );
    }
}

/// Rate deviation rejects single-sample runs
#[test]
fn test_rate_deviation_requires_two_samples() {
    assert_eq!(
        compute_rate_deviation(&[0.01]),
        Err(StatsError::InsufficientSamples { len: 1 })
    );
}

#[derive(Default)]
struct RecordingCharts {
    bars: Mutex<Vec<usize>>,
}

impl ChartService for &'static RecordingCharts {
    async fn submit(&self, submission: ChartSubmission) -> Result<String, SubmissionError> {
        self.bars.lock().unwrap().push(submission.figure.data.len());
        Ok(format!("https://plot.ly/~ci/{}", submission.filename))
    }
}

/// Full reporter lifecycle: progress, JSON file, summary and chart upload
#[tokio::test]
async fn test_reporter_lifecycle() {
    let charts: &'static RecordingCharts = Box::leak(Box::default());
    let dir = tempfile::TempDir::new().unwrap();
    let json_path = dir.path().join("bench/results.json");

    let config = ReporterConfig {
        path_to_json: Some(json_path.clone()),
        username: Some("ci".to_string()),
        api_key: Some("key".to_string()),
        filename: "nightly".to_string(),
        ..Default::default()
    };
    let mut reporter =
        Reporter::with_chart_service(config, Vec::new(), ReporterHooks::default(), charts)
            .unwrap();

    for group in cross_browser_run().groups() {
        for s in group.samples {
            reporter.on_spec_complete(group.browser, s.clone()).unwrap();
        }
    }
    let doc = reporter
        .on_run_complete(&["Chrome 90".to_string(), "Firefox 88".to_string()])
        .unwrap();
    assert_eq!(doc.runs.len(), 6);
    assert_eq!(reporter.pending_submissions(), 1);

    let done = AtomicUsize::new(0);
    reporter
        .on_exit(|| {
            done.fetch_add(1, Ordering::SeqCst);
        })
        .await
        .unwrap();
    assert_eq!(done.load(Ordering::SeqCst), 1);
    assert_eq!(*charts.bars.lock().unwrap(), [6]);

    let written = parse_json_report(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(written, doc);

    let output = String::from_utf8(reporter.output().clone()).unwrap();
    assert!(output.starts_with("......\n"));
    assert!(output.contains("Math Suite: \"add\" at 1000 ops/sec (2.00 x faster than \"mul\")\n"));
    assert!(output.ends_with("plotly: https://plot.ly/~ci/nightly\n"));
}
