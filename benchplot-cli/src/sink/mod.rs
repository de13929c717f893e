//! Output Sinks
//!
//! External boundaries of a run: the JSON results file and the plotly
//! upload service.

mod json;
mod plotly;

pub use json::{SinkError, write_json_file};
pub use plotly::{ChartService, ChartSubmission, PlotlyClient, SubmissionError, submit_bounded};
