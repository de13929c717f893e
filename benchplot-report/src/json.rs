//! JSON Output

use crate::document::ResultsDocument;

/// Render a (possibly user-formatted) results value as pretty JSON.
pub fn generate_json_report(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Parse a JSON export written with the default formatter.
pub fn parse_json_report(json: &str) -> Result<ResultsDocument, serde_json::Error> {
    serde_json::from_str(json)
}
