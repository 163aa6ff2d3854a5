use serde::{Deserialize, Serialize};

use crate::core::{
    ChartConfiguration, ChartData, ChartOptions, ChartType, ConfigurationView, Dataset,
};
use crate::engine::{DrawingEngine, InstanceId, RedrawRequest, SurfaceHandle};

use super::{ChartComponentConfig, InstanceManager, ReconcileStats};

/// Where the component is in the host-driven lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecyclePhase {
    #[default]
    Created,
    Mounted,
    Unmounted,
}

/// Chart bound to one drawing surface and driven by host lifecycle signals.
///
/// The public fields are the declared configuration. Assigning them has no
/// side effect; the next check cycle notices the difference and reconciles
/// the live instance.
pub struct ChartComponent<E: DrawingEngine> {
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub options: ChartOptions,
    pub(super) surface: SurfaceHandle,
    pub(super) manager: InstanceManager<E>,
    pub(super) reconcile_redraw: RedrawRequest,
    pub(super) phase: LifecyclePhase,
    pub(super) stats: ReconcileStats,
}

impl<E: DrawingEngine> ChartComponent<E> {
    #[must_use]
    pub fn new(engine: E, surface: SurfaceHandle, config: ChartComponentConfig) -> Self {
        let ChartConfiguration {
            chart_type,
            data: ChartData { labels, datasets },
            options,
        } = config.configuration;
        Self {
            chart_type,
            labels,
            datasets,
            options,
            surface,
            manager: InstanceManager::new(engine),
            reconcile_redraw: config.reconcile_redraw,
            phase: LifecyclePhase::Created,
            stats: ReconcileStats::default(),
        }
    }

    /// Replaces all four public fields at once. Same semantics as assigning them.
    pub fn set_configuration(&mut self, configuration: ChartConfiguration) {
        self.chart_type = configuration.chart_type;
        self.labels = configuration.data.labels;
        self.datasets = configuration.data.datasets;
        self.options = configuration.options;
    }

    #[must_use]
    pub fn configuration_view(&self) -> ConfigurationView<'_> {
        ConfigurationView {
            chart_type: self.chart_type,
            labels: &self.labels,
            datasets: &self.datasets,
            options: &self.options,
        }
    }

    #[must_use]
    pub fn configuration(&self) -> ChartConfiguration {
        self.configuration_view().to_configuration()
    }

    /// Configuration last applied to the live instance.
    #[must_use]
    pub fn applied_configuration(&self) -> Option<&ChartConfiguration> {
        self.manager
            .snapshot()
            .map(|snapshot| snapshot.configuration())
    }

    #[must_use]
    pub fn surface(&self) -> &SurfaceHandle {
        &self.surface
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub fn has_instance(&self) -> bool {
        self.manager.has_instance()
    }

    #[must_use]
    pub fn instance_id(&self) -> Option<InstanceId> {
        self.manager.instance_id()
    }

    /// Live engine instance for advanced host usage.
    #[must_use]
    pub fn chart(&self) -> Option<&E::Instance> {
        self.manager.instance()
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        self.manager.engine()
    }

    #[must_use]
    pub fn reconcile_redraw(&self) -> RedrawRequest {
        self.reconcile_redraw
    }

    pub fn set_reconcile_redraw(&mut self, request: RedrawRequest) {
        self.reconcile_redraw = request;
    }

    #[must_use]
    pub fn reconcile_stats(&self) -> ReconcileStats {
        self.stats
    }
}
