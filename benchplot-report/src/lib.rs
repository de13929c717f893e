#![warn(missing_docs)]
//! Benchplot Report - Rendering
//!
//! Turns aggregated runs into the outputs of a benchmark run:
//! - JSON results document (`{ meta, runs }`)
//! - Text summary comparing the fastest runs of each browser/suite group
//! - Plotly bar chart specification with rate error bars
//!
//! The JSON shape and the chart generation can both be replaced by
//! user-supplied hooks (see [`JsonFormatter`] and [`FigureMaker`]).

mod chart;
mod document;
mod hooks;
mod json;
mod summary;

pub use chart::{
    Axis, BarTrace, ChartOptions, DEFAULT_CHART_TITLE, ErrorBar, Figure, Layout, Margin,
    X_AXIS_TITLE, bar_label, build_chart_spec, longest_label_len,
};
pub use document::ResultsDocument;
pub use hooks::{FigureMaker, JsonFormatter, default_figure_maker, default_json_formatter};
pub use json::{generate_json_report, parse_json_report};
pub use summary::{render_group_line, render_text_summary};
