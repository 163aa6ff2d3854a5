//! Contract with the external drawing engine.
//!
//! The binding only constructs, updates, queries and destroys instances
//! through these traits; rendering stays entirely engine-side.

mod events;
mod recording;
mod surface;

pub use events::{
    CallbackListener, ChartEvent, ChartEventListener, EventChannel, EventChannels, EventSink,
    InteractionPayload, ResizePayload,
};
pub(crate) use events::ListenerSet;
pub use recording::{
    EngineCall, EngineCallKind, RecordingEngine, RecordingHandle, RecordingInstance,
};
pub use surface::{SurfaceHandle, SurfaceId};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::{
    ChartConfiguration, ChartElement, ChartOptions, Dataset, DatasetMeta, ElementList, Point,
};
use crate::error::ChartResult;

/// Identity of one constructed chart instance, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

impl InstanceId {
    pub(crate) fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

/// Animation parameters for `update` and `render`.
///
/// `duration_ms = None` lets the engine use its configured default; `lazy`
/// allows the redraw animation to be interrupted by later animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RedrawRequest {
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub lazy: bool,
}

impl RedrawRequest {
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            duration_ms: Some(0),
            lazy: false,
        }
    }

    #[must_use]
    pub fn animated(duration_ms: u64, lazy: bool) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            lazy,
        }
    }
}

/// Live chart handle owned by exactly one `InstanceManager`.
pub trait ChartInstance {
    /// Replaces the label array the instance draws from. Takes effect on `update`.
    fn set_labels(&mut self, labels: &[String]);
    /// Replaces the dataset list. Takes effect on `update`.
    fn set_datasets(&mut self, datasets: &[Dataset]);
    /// Replaces the option bag. Takes effect on `update`.
    fn set_options(&mut self, options: &ChartOptions);

    /// Recomputes scales and legends from current data and redraws.
    fn update(&mut self, request: RedrawRequest) -> ChartResult<()>;
    /// Redraws existing elements without picking up new data.
    fn render(&mut self, request: RedrawRequest) -> ChartResult<()>;
    /// Pauses any running animation loop.
    fn stop(&mut self) -> ChartResult<()>;
    /// Re-reads the surface size and relayouts.
    fn resize(&mut self) -> ChartResult<()>;
    fn clear(&mut self) -> ChartResult<()>;
    fn to_base64_image(&self) -> ChartResult<String>;
    fn generate_legend(&self) -> ChartResult<String>;

    /// First element under `point`, if any.
    fn element_at_point(&self, point: Point) -> Option<ChartElement>;
    /// All elements sharing the data index of the element under `point`.
    fn elements_at_point(&self, point: Point) -> ElementList;
    /// All elements of the dataset under `point`.
    fn dataset_at_point(&self, point: Point) -> ElementList;
    fn dataset_meta(&self, index: usize) -> Option<DatasetMeta>;

    /// Releases engine resources and stops emitting callbacks.
    fn destroy(self);
}

/// Factory side of the drawing engine.
pub trait DrawingEngine {
    type Instance: ChartInstance;

    /// Builds an instance on `surface`.
    ///
    /// The engine must route its click/hover/resize callbacks through
    /// `events` and report rejections as `ChartError::EngineConstruction`.
    fn construct(
        &mut self,
        instance_id: InstanceId,
        surface: &SurfaceHandle,
        configuration: &ChartConfiguration,
        events: EventSink,
    ) -> ChartResult<Self::Instance>;
}
