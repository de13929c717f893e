//! Results Document

use benchplot_core::RunRecord;
use serde::{Deserialize, Serialize};

/// Exported results of one run: `{ meta: {}, runs: [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsDocument {
    /// Free-form metadata, empty by default
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
    /// Runs sorted fastest-first
    pub runs: Vec<RunRecord>,
}

impl ResultsDocument {
    /// Wrap fastest-first records with empty metadata
    pub fn new(runs: Vec<RunRecord>) -> Self {
        Self {
            meta: serde_json::Map::new(),
            runs,
        }
    }
}
