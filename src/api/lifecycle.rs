use tracing::{debug, trace};

use crate::engine::DrawingEngine;
use crate::error::{ChartError, ChartResult};

use super::{ChartComponent, LifecyclePhase, ReconcileOutcome};

/// Signals a host UI framework delivers to a component.
///
/// Hosts call these non-reentrantly in the order mount, any number of
/// checks, unmount.
pub trait ComponentLifecycle {
    /// The component was attached and its surface is resolved.
    fn on_mount(&mut self) -> ChartResult<()>;
    /// A change-detection cycle ran; may fire redundantly.
    fn on_check(&mut self) -> ChartResult<ReconcileOutcome>;
    /// The component is about to be torn down.
    fn on_unmount(&mut self);
}

impl<E: DrawingEngine> ComponentLifecycle for ChartComponent<E> {
    fn on_mount(&mut self) -> ChartResult<()> {
        let configuration = self.configuration();
        let created = self.manager.create(&self.surface, configuration);
        match &created {
            // Lifecycle ordering bug upstream; leave the phase untouched.
            Err(ChartError::StaleInstance { .. }) => {}
            _ => self.phase = LifecyclePhase::Mounted,
        }
        let instance = created?;
        debug!(
            instance = %instance,
            surface = %self.surface.id(),
            "chart component mounted"
        );
        Ok(())
    }

    fn on_check(&mut self) -> ChartResult<ReconcileOutcome> {
        trace!(phase = ?self.phase, "chart component check cycle");
        self.reconcile()
    }

    fn on_unmount(&mut self) {
        self.manager.destroy();
        self.phase = LifecyclePhase::Unmounted;
        debug!(surface = %self.surface.id(), "chart component unmounted");
    }
}
