use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Styling attribute that applies either to the whole dataset or per point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue<T> {
    Scalar(T),
    PerPoint(Vec<T>),
}

impl<T> StyleValue<T> {
    /// Resolves the value drawn for the point at `index`.
    ///
    /// Per-point sequences do not wrap; indexes past the end resolve to `None`.
    #[must_use]
    pub fn resolve(&self, index: usize) -> Option<&T> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::PerPoint(values) => values.get(index),
        }
    }
}

impl From<f64> for StyleValue<f64> {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<String> for StyleValue<String> {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for StyleValue<String> {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl<T> From<Vec<T>> for StyleValue<T> {
    fn from(values: Vec<T>) -> Self {
        Self::PerPoint(values)
    }
}

/// Optional styling attributes forwarded verbatim to the drawing engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    #[serde(rename = "xAxisID", default, skip_serializing_if = "Option::is_none")]
    pub x_axis_id: Option<String>,
    #[serde(rename = "yAxisID", default, skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_tension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<StyleValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_cap_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_dash_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_join_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_border_width: Option<StyleValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<StyleValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<StyleValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_hit_radius: Option<StyleValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_hover_background_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_hover_border_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_hover_border_width: Option<StyleValue<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_style: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_gaps: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stepped_line: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_skipped: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_border_color: Option<StyleValue<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_border_width: Option<StyleValue<f64>>,
}

/// One data series as declared by the host.
///
/// The binding never interprets a dataset; it is only compared for change
/// detection and handed to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    /// Data values; `NaN` marks a gap and is written as `null`.
    #[serde(with = "gap_data")]
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: DatasetStyle,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            style: DatasetStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: DatasetStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<StyleValue<String>>) -> Self {
        self.style.background_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_border_color(mut self, color: impl Into<StyleValue<String>>) -> Self {
        self.style.border_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_border_width(mut self, width: impl Into<StyleValue<f64>>) -> Self {
        self.style.border_width = Some(width.into());
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.style.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Data gaps are encoded as NaN; they must compare equal to themselves or an
// unchanged dataset would look dirty on every check cycle.
impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(left, right)| OrderedFloat(*left) == OrderedFloat(*right))
            && self.style == other.style
    }
}

/// Serde adapter for data with gaps: `null` on the wire, `NaN` in memory.
mod gap_data {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(data.iter().map(|value| value.is_finite().then_some(*value)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values
            .into_iter()
            .map(|value| value.unwrap_or(f64::NAN))
            .collect())
    }
}
