//! chart-binding: keeps a declarative chart configuration in sync with a live
//! drawing-engine chart instance.
//!
//! The host owns the configuration fields and drives the component through
//! mount, check and unmount signals. Each check diffs the fields against the
//! last applied snapshot and either does nothing, patches the live instance
//! with a single update, or rebuilds it when the chart type changed.

pub mod api;
pub mod core;
pub mod engine;
pub mod error;
pub mod telemetry;

pub use api::{ChartComponent, ChartComponentConfig, ComponentLifecycle, ReconcileOutcome};
pub use error::{ChartError, ChartResult};
