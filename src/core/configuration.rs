use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::{ChartOptions, ChartType, Dataset};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

/// Full declarative description handed to the engine at construction time.
///
/// Serializes to the engine's wire shape:
/// `{ "type": ..., "data": { "labels": [...], "datasets": [...] }, "options": {...} }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartConfiguration {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default)]
    pub data: ChartData,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartConfiguration {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_datasets(mut self, datasets: Vec<Dataset>) -> Self {
        self.data.datasets = datasets;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn view(&self) -> ConfigurationView<'_> {
        ConfigurationView {
            chart_type: self.chart_type,
            labels: &self.data.labels,
            datasets: &self.data.datasets,
            options: &self.options,
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart configuration json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart configuration: {e}"))
        })
    }
}

/// Borrowed, immutable view over one configuration.
///
/// Lets the component diff its public fields against the snapshot without
/// cloning them on every check cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigurationView<'a> {
    pub chart_type: ChartType,
    pub labels: &'a [String],
    pub datasets: &'a [Dataset],
    pub options: &'a ChartOptions,
}

impl ConfigurationView<'_> {
    #[must_use]
    pub fn to_configuration(self) -> ChartConfiguration {
        ChartConfiguration {
            chart_type: self.chart_type,
            data: ChartData {
                labels: self.labels.to_vec(),
                datasets: self.datasets.to_vec(),
            },
            options: self.options.clone(),
        }
    }
}
