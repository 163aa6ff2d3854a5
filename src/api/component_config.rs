use serde::{Deserialize, Serialize};

use crate::core::ChartConfiguration;
use crate::engine::RedrawRequest;
use crate::error::{ChartError, ChartResult};

/// Public component bootstrap configuration.
///
/// Serializable so hosts can keep chart setups in JSON alongside their other
/// view definitions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartComponentConfig {
    /// Initial values of the public configuration fields.
    #[serde(default)]
    pub configuration: ChartConfiguration,
    /// Animation parameters of the update call issued by reconciliation.
    #[serde(default)]
    pub reconcile_redraw: RedrawRequest,
}

impl ChartComponentConfig {
    #[must_use]
    pub fn new(configuration: ChartConfiguration) -> Self {
        Self {
            configuration,
            reconcile_redraw: RedrawRequest::default(),
        }
    }

    #[must_use]
    pub fn with_reconcile_redraw(mut self, request: RedrawRequest) -> Self {
        self.reconcile_redraw = request;
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse component config json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize component config: {e}"))
        })
    }
}
