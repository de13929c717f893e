//! Formatting Hooks
//!
//! Both hooks receive the normalized [`ResultsDocument`] and fully replace the
//! default output when supplied. They are resolved once, when a reporter is
//! built.

use crate::chart::{ChartOptions, Figure, build_chart_spec};
use crate::document::ResultsDocument;
use std::sync::Arc;

/// Replaces the JSON export shape
pub type JsonFormatter =
    Arc<dyn Fn(&ResultsDocument) -> Result<serde_json::Value, serde_json::Error> + Send + Sync>;

/// Replaces chart generation; may return several figures
pub type FigureMaker = Arc<dyn Fn(&ResultsDocument, &ChartOptions) -> Vec<Figure> + Send + Sync>;

/// Serialize the document as-is
pub fn default_json_formatter() -> JsonFormatter {
    Arc::new(|doc: &ResultsDocument| serde_json::to_value(doc))
}

/// One bar chart covering every run
pub fn default_figure_maker() -> FigureMaker {
    Arc::new(|doc: &ResultsDocument, options: &ChartOptions| {
        vec![build_chart_spec(&doc.runs, options)]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_json_formatter_replaces_default() {
        let formatter: JsonFormatter = Arc::new(|doc: &ResultsDocument| {
            Ok(serde_json::json!({ "count": doc.runs.len() }))
        });
        let value = formatter(&ResultsDocument::default()).unwrap();
        assert_eq!(value, serde_json::json!({ "count": 0 }));
    }

    #[test]
    fn test_default_figure_maker_single_figure() {
        let figures =
            default_figure_maker()(&ResultsDocument::default(), &ChartOptions::default());
        assert_eq!(figures.len(), 1);
        assert!(figures[0].data.is_empty());
    }
}
