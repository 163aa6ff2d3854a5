use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Chart geometry family understood by the drawing engine.
///
/// The engine cannot morph one family into another, so a change here always
/// forces a rebuild of the live instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Radar,
    PolarArea,
    Doughnut,
    Pie,
}

impl ChartType {
    pub const ALL: [Self; 6] = [
        Self::Line,
        Self::Bar,
        Self::Radar,
        Self::PolarArea,
        Self::Doughnut,
        Self::Pie,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Radar => "radar",
            Self::PolarArea => "polarArea",
            Self::Doughnut => "doughnut",
            Self::Pie => "pie",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    fn from_str(input: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == input)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart type `{input}`")))
    }
}

/// Pixel-space position on the drawing surface, used by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One drawn element (point, bar, arc) addressed by dataset and data index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartElement {
    pub dataset_index: usize,
    pub index: usize,
}

impl ChartElement {
    #[must_use]
    pub fn new(dataset_index: usize, index: usize) -> Self {
        Self {
            dataset_index,
            index,
        }
    }
}

/// Hit-test result list; most queries hit only a handful of elements.
pub type ElementList = SmallVec<[ChartElement; 4]>;

/// Engine-side metadata describing how one dataset was laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMeta {
    pub index: usize,
    pub chart_type: ChartType,
    pub label: String,
    pub hidden: bool,
    pub elements: Vec<ChartElement>,
}
