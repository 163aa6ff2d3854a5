use crate::core::{ChartElement, DatasetMeta, ElementList, Point};
use crate::engine::{ChartInstance, DrawingEngine, RedrawRequest};
use crate::error::ChartResult;

use super::ChartComponent;

// Every forwarding call fails with `ChartError::NoInstance` when no instance
// is live (before mount, after destroy/unmount, after a failed rebuild).
impl<E: DrawingEngine> ChartComponent<E> {
    /// Recomputes scales and legends from the instance's current data.
    ///
    /// Does not read the public fields; use `reconcile` for that.
    pub fn update(&mut self, request: RedrawRequest) -> ChartResult<()> {
        self.manager.live_instance_mut("update")?.update(request)
    }

    /// Redraws existing elements without picking up new data.
    pub fn render(&mut self, request: RedrawRequest) -> ChartResult<()> {
        self.manager.live_instance_mut("render")?.render(request)
    }

    /// Pauses the current animation loop; `render` resumes it.
    pub fn stop(&mut self) -> ChartResult<()> {
        self.manager.live_instance_mut("stop")?.stop()
    }

    /// Relayouts after the surface container changed size.
    pub fn resize(&mut self) -> ChartResult<()> {
        self.manager.live_instance_mut("resize")?.resize()
    }

    pub fn clear(&mut self) -> ChartResult<()> {
        self.manager.live_instance_mut("clear")?.clear()
    }

    /// Base64 data URI of the chart in its current state.
    pub fn to_base64_image(&self) -> ChartResult<String> {
        self.manager.live_instance("to_base64_image")?.to_base64_image()
    }

    /// Legend markup produced by the engine's legend callback.
    pub fn generate_legend(&self) -> ChartResult<String> {
        self.manager.live_instance("generate_legend")?.generate_legend()
    }

    pub fn element_at_point(&self, point: Point) -> ChartResult<Option<ChartElement>> {
        Ok(self
            .manager
            .live_instance("element_at_point")?
            .element_at_point(point))
    }

    pub fn elements_at_point(&self, point: Point) -> ChartResult<ElementList> {
        Ok(self
            .manager
            .live_instance("elements_at_point")?
            .elements_at_point(point))
    }

    pub fn dataset_at_point(&self, point: Point) -> ChartResult<ElementList> {
        Ok(self
            .manager
            .live_instance("dataset_at_point")?
            .dataset_at_point(point))
    }

    pub fn dataset_meta(&self, index: usize) -> ChartResult<Option<DatasetMeta>> {
        Ok(self
            .manager
            .live_instance("dataset_meta")?
            .dataset_meta(index))
    }

    /// Destroys the live instance and its callback wiring.
    ///
    /// The component stays mounted but inert until the next mount; returns
    /// `false` when nothing was live.
    pub fn destroy(&mut self) -> bool {
        self.manager.destroy()
    }
}
