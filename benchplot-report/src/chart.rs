//! Chart Specification
//!
//! Builds a plotly figure with one horizontal bar per run. Runs arrive
//! fastest-first and the y-axis is reversed, so the chart reads from the
//! fastest bar at the top to the slowest at the bottom.

use benchplot_core::RunRecord;
use serde::{Deserialize, Serialize};

/// Default chart title / plotly filename
pub const DEFAULT_CHART_TITLE: &str = "karma-plotly-reporter";

/// Title of the throughput axis
pub const X_AXIS_TITLE: &str = "Operations per second";

/// Base left margin in pixels
const BASE_MARGIN: usize = 80;

/// Pixels reserved per label character
const MARGIN_PER_CHAR: usize = 4;

const BASE_HEIGHT: usize = 100;
const HEIGHT_PER_BAR: usize = 40;

/// Options shared by every generated figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Chart title
    pub title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHART_TITLE.to_string(),
        }
    }
}

/// Plotly figure: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// One single-bar trace per run
    pub data: Vec<BarTrace>,
    /// Layout hints
    pub layout: Layout,
}

/// Horizontal bar trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    /// Always `bar`
    #[serde(rename = "type")]
    pub kind: String,
    /// Always `h`
    pub orientation: String,
    /// Trace name, the run's identity key
    pub name: String,
    /// Throughput values (ops/sec)
    pub x: Vec<f64>,
    /// Bar labels
    pub y: Vec<String>,
    /// Rate deviation bar
    pub error_x: ErrorBar,
    /// Hover text
    pub text: Vec<String>,
    /// Which fields appear on hover
    pub hoverinfo: String,
}

/// Symmetric error bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBar {
    /// Always `data`
    #[serde(rename = "type")]
    pub kind: String,
    /// Error magnitude per bar
    pub array: Vec<f64>,
    /// Whether the bar is drawn
    pub visible: bool,
}

/// Figure layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Chart title
    pub title: String,
    /// Legend visibility
    pub showlegend: bool,
    /// Hover behaviour
    pub hovermode: String,
    /// Plot height in pixels
    pub height: usize,
    /// Plot margins
    pub margin: Margin,
    /// Throughput axis
    pub xaxis: Axis,
    /// Label axis
    pub yaxis: Axis,
}

/// Plot margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Left margin, sized to fit the longest label
    pub l: usize,
}

/// Axis settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Autorange mode, `reversed` keeps the fastest bar on top
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autorange: Option<String>,
}

/// Bar label: suite, name and browser on separate lines
pub fn bar_label(record: &RunRecord) -> String {
    format!("{}<br>{}<br>{}", record.suite, record.name, record.browser)
}

fn hover_text(record: &RunRecord) -> String {
    format!("{}<br>{:.2} ops/sec", bar_label(record), record.hz)
}

/// Longest suite, name or browser string across all records, in characters
pub fn longest_label_len(records: &[RunRecord]) -> usize {
    records
        .iter()
        .map(RunRecord::longest_label_len)
        .max()
        .unwrap_or(0)
}

/// Build the bar chart for fastest-first records.
///
/// The left margin is `80 + 4 * longest_label_len`, which approximates the
/// space needed for the labels without measuring rendered text.
pub fn build_chart_spec(records: &[RunRecord], options: &ChartOptions) -> Figure {
    let data = records
        .iter()
        .map(|record| {
            let label = bar_label(record);
            BarTrace {
                kind: "bar".to_string(),
                orientation: "h".to_string(),
                name: label.clone(),
                x: vec![record.hz],
                y: vec![label],
                error_x: ErrorBar {
                    kind: "data".to_string(),
                    array: vec![record.hz_deviation],
                    visible: true,
                },
                text: vec![hover_text(record)],
                hoverinfo: "text".to_string(),
            }
        })
        .collect::<Vec<_>>();

    let layout = Layout {
        title: options.title.clone(),
        showlegend: false,
        hovermode: "closest".to_string(),
        height: BASE_HEIGHT + HEIGHT_PER_BAR * data.len(),
        margin: Margin {
            l: BASE_MARGIN + MARGIN_PER_CHAR * longest_label_len(records),
        },
        xaxis: Axis {
            title: Some(X_AXIS_TITLE.to_string()),
            autorange: None,
        },
        yaxis: Axis {
            title: None,
            autorange: Some("reversed".to_string()),
        },
    };

    Figure { data, layout }
}
