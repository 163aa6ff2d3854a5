//! Declarative chart description owned by the host.

pub mod configuration;
pub mod dataset;
pub mod options;
pub mod types;

pub use configuration::{ChartConfiguration, ChartData, ConfigurationView};
pub use dataset::{Dataset, DatasetStyle, StyleValue};
pub use options::{
    AnimationConfiguration, ChartOptions, HoverConfiguration, LegendConfiguration,
    LegendItemConfiguration, PanZoomConfiguration, TitleConfiguration, TooltipConfiguration,
};
pub use types::{ChartElement, ChartType, DatasetMeta, ElementList, Point, SurfaceSize};
