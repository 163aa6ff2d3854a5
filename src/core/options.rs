use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

pub const OPTION_RESPONSIVE: &str = "responsive";
pub const OPTION_RESPONSIVE_ANIMATION_DURATION: &str = "responsiveAnimationDuration";
pub const OPTION_MAINTAIN_ASPECT_RATIO: &str = "maintainAspectRatio";
pub const OPTION_EVENTS: &str = "events";
pub const OPTION_TITLE: &str = "title";
pub const OPTION_LEGEND: &str = "legend";
pub const OPTION_HOVER: &str = "hover";
pub const OPTION_TOOLTIPS: &str = "tooltips";
pub const OPTION_ANIMATION: &str = "animation";
pub const OPTION_PAN: &str = "pan";
pub const OPTION_ZOOM: &str = "zoom";

/// Opaque option bag handed to the drawing engine.
///
/// Keys keep insertion order so serialized output is deterministic. The
/// binding compares bags structurally and never interprets them; the typed
/// accessors below only exist for host convenience.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartOptions {
    entries: IndexMap<String, Value>,
}

impl ChartOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from a JSON object. Any other JSON value is rejected.
    pub fn from_value(value: Value) -> ChartResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                entries: map.into_iter().collect(),
            }),
            other => Err(ChartError::InvalidData(format!(
                "chart options must be a json object, got `{other}`"
            ))),
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Sets a raw entry, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Removes an entry while keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set(key, value);
        self
    }

    fn typed_section<T: DeserializeOwned>(&self, key: &str) -> ChartResult<Option<T>> {
        self.entries
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| {
                    ChartError::InvalidData(format!("failed to decode option `{key}`: {e}"))
                })
            })
            .transpose()
    }

    fn with_typed_section<T: Serialize>(mut self, key: &str, section: &T) -> ChartResult<Self> {
        let value = serde_json::to_value(section).map_err(|e| {
            ChartError::InvalidData(format!("failed to encode option `{key}`: {e}"))
        })?;
        self.set(key, value);
        Ok(self)
    }

    #[must_use]
    pub fn responsive(&self) -> Option<bool> {
        self.get(OPTION_RESPONSIVE).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn with_responsive(self, responsive: bool) -> Self {
        self.with(OPTION_RESPONSIVE, Value::Bool(responsive))
    }

    #[must_use]
    pub fn responsive_animation_duration(&self) -> Option<u64> {
        self.get(OPTION_RESPONSIVE_ANIMATION_DURATION)
            .and_then(Value::as_u64)
    }

    #[must_use]
    pub fn with_responsive_animation_duration(self, duration_ms: u64) -> Self {
        self.with(OPTION_RESPONSIVE_ANIMATION_DURATION, Value::from(duration_ms))
    }

    #[must_use]
    pub fn maintain_aspect_ratio(&self) -> Option<bool> {
        self.get(OPTION_MAINTAIN_ASPECT_RATIO)
            .and_then(Value::as_bool)
    }

    #[must_use]
    pub fn with_maintain_aspect_ratio(self, maintain: bool) -> Self {
        self.with(OPTION_MAINTAIN_ASPECT_RATIO, Value::Bool(maintain))
    }

    /// Input events the engine listens to for hover and tooltips.
    pub fn events(&self) -> ChartResult<Option<Vec<String>>> {
        self.typed_section(OPTION_EVENTS)
    }

    pub fn with_events<I, S>(self, events: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let events: Vec<String> = events.into_iter().map(Into::into).collect();
        self.with_typed_section(OPTION_EVENTS, &events)
    }

    pub fn title(&self) -> ChartResult<Option<TitleConfiguration>> {
        self.typed_section(OPTION_TITLE)
    }

    pub fn with_title(self, title: &TitleConfiguration) -> ChartResult<Self> {
        self.with_typed_section(OPTION_TITLE, title)
    }

    pub fn legend(&self) -> ChartResult<Option<LegendConfiguration>> {
        self.typed_section(OPTION_LEGEND)
    }

    pub fn with_legend(self, legend: &LegendConfiguration) -> ChartResult<Self> {
        self.with_typed_section(OPTION_LEGEND, legend)
    }

    pub fn hover(&self) -> ChartResult<Option<HoverConfiguration>> {
        self.typed_section(OPTION_HOVER)
    }

    pub fn with_hover(self, hover: &HoverConfiguration) -> ChartResult<Self> {
        self.with_typed_section(OPTION_HOVER, hover)
    }

    pub fn tooltips(&self) -> ChartResult<Option<TooltipConfiguration>> {
        self.typed_section(OPTION_TOOLTIPS)
    }

    pub fn with_tooltips(self, tooltips: &TooltipConfiguration) -> ChartResult<Self> {
        self.with_typed_section(OPTION_TOOLTIPS, tooltips)
    }

    pub fn animation(&self) -> ChartResult<Option<AnimationConfiguration>> {
        self.typed_section(OPTION_ANIMATION)
    }

    pub fn with_animation(self, animation: &AnimationConfiguration) -> ChartResult<Self> {
        self.with_typed_section(OPTION_ANIMATION, animation)
    }

    pub fn pan(&self) -> ChartResult<Option<PanZoomConfiguration>> {
        self.typed_section(OPTION_PAN)
    }

    pub fn with_pan(self, pan: &PanZoomConfiguration) -> ChartResult<Self> {
        self.with_typed_section(OPTION_PAN, pan)
    }

    pub fn zoom(&self) -> ChartResult<Option<PanZoomConfiguration>> {
        self.typed_section(OPTION_ZOOM)
    }

    pub fn with_zoom(self, zoom: &PanZoomConfiguration) -> ChartResult<Self> {
        self.with_typed_section(OPTION_ZOOM, zoom)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    /// `top` or `bottom`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_width: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendItemConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItemConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_point_style: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoverConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_duration: Option<u64>,
}

/// Tooltip styling. Callback hooks stay engine-side and are not modelled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caret_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_key_background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

/// Pan or zoom plugin settings; `mode` is `x`, `y` or `xy`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanZoomConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}
