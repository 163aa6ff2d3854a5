use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error, trace, warn};

use crate::core::{ChartConfiguration, ConfigurationView};
use crate::engine::{
    ChartInstance, DrawingEngine, EventSink, InstanceId, ListenerSet, RedrawRequest,
    SurfaceHandle,
};
use crate::error::{ChartError, ChartResult};

use super::{ConfigChange, ConfigChanges, ConfigSnapshot};

struct LiveInstance<I> {
    id: InstanceId,
    instance: I,
    sink: EventSink,
    surface: SurfaceHandle,
    snapshot: ConfigSnapshot,
}

/// Sole owner of the engine instance backing one component.
///
/// The instance and the snapshot it was built from live in one slot, so a
/// live instance without a snapshot cannot be represented. The slot is only
/// filled by `create` and only emptied by `destroy`.
pub struct InstanceManager<E: DrawingEngine> {
    engine: E,
    listeners: Rc<RefCell<ListenerSet>>,
    live: Option<LiveInstance<E::Instance>>,
}

impl<E: DrawingEngine> InstanceManager<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            listeners: Rc::new(RefCell::new(ListenerSet::default())),
            live: None,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn has_instance(&self) -> bool {
        self.live.is_some()
    }

    #[must_use]
    pub fn instance_id(&self) -> Option<InstanceId> {
        self.live.as_ref().map(|live| live.id)
    }

    #[must_use]
    pub fn instance(&self) -> Option<&E::Instance> {
        self.live.as_ref().map(|live| &live.instance)
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&ConfigSnapshot> {
        self.live.as_ref().map(|live| &live.snapshot)
    }

    pub(crate) fn listeners(&self) -> &Rc<RefCell<ListenerSet>> {
        &self.listeners
    }

    pub(crate) fn live_instance(&self, operation: &'static str) -> ChartResult<&E::Instance> {
        self.live
            .as_ref()
            .map(|live| &live.instance)
            .ok_or(ChartError::NoInstance { operation })
    }

    pub(crate) fn live_instance_mut(
        &mut self,
        operation: &'static str,
    ) -> ChartResult<&mut E::Instance> {
        self.live
            .as_mut()
            .map(|live| &mut live.instance)
            .ok_or(ChartError::NoInstance { operation })
    }

    /// Constructs a new instance on `surface` and takes its first snapshot.
    ///
    /// Fails with `StaleInstance` when this manager still owns a live
    /// instance or the surface is bound to one that was never destroyed.
    pub fn create(
        &mut self,
        surface: &SurfaceHandle,
        configuration: ChartConfiguration,
    ) -> ChartResult<InstanceId> {
        if let Some(live) = &self.live {
            error!(
                surface = %surface.id(),
                live_instance = %live.id,
                "create requested while a chart instance is still live"
            );
            return Err(ChartError::StaleInstance {
                surface: live.surface.id(),
            });
        }
        if let Some(bound) = surface.bound_instance() {
            error!(
                surface = %surface.id(),
                bound_instance = %bound,
                "surface reused without destroying its chart instance"
            );
            return Err(ChartError::StaleInstance {
                surface: surface.id(),
            });
        }
        if !surface.is_valid() {
            let size = surface.size();
            return Err(ChartError::EngineConstruction {
                reason: format!(
                    "surface {} has invalid size {}x{}",
                    surface.id(),
                    size.width,
                    size.height
                ),
            });
        }

        let id = InstanceId::next();
        let sink = EventSink::new(id, Rc::clone(&self.listeners));
        let instance = match self
            .engine
            .construct(id, surface, &configuration, sink.clone())
        {
            Ok(instance) => instance,
            Err(err) => {
                sink.detach();
                warn!(
                    surface = %surface.id(),
                    chart_type = %configuration.chart_type,
                    error = %err,
                    "engine rejected chart construction"
                );
                return Err(into_construction_error(err));
            }
        };

        surface.bind(id);
        debug!(
            instance = %id,
            surface = %surface.id(),
            chart_type = %configuration.chart_type,
            labels = configuration.data.labels.len(),
            datasets = configuration.data.datasets.len(),
            "chart instance created"
        );
        self.live = Some(LiveInstance {
            id,
            instance,
            sink,
            surface: surface.clone(),
            snapshot: ConfigSnapshot::new(configuration),
        });
        Ok(id)
    }

    /// Destroys the live instance, if any, and detaches its callbacks.
    ///
    /// Returns `false` when there was nothing to destroy.
    pub fn destroy(&mut self) -> bool {
        let Some(live) = self.live.take() else {
            trace!("destroy skipped: no live chart instance");
            return false;
        };
        live.sink.detach();
        live.surface.release(live.id);
        live.instance.destroy();
        debug!(
            instance = %live.id,
            surface = %live.surface.id(),
            "chart instance destroyed"
        );
        true
    }

    /// Destroy-then-create on the same surface.
    pub(crate) fn rebuild(
        &mut self,
        surface: &SurfaceHandle,
        configuration: ChartConfiguration,
    ) -> ChartResult<InstanceId> {
        self.destroy();
        self.create(surface, configuration)
    }

    /// Patches the dirty parts onto the live instance and issues one update.
    ///
    /// The snapshot only advances when the engine accepted the update. On
    /// failure the dirty parts are restored from the snapshot so the instance
    /// never holds values the snapshot does not describe.
    pub(crate) fn apply_update(
        &mut self,
        changes: ConfigChanges,
        current: ConfigurationView<'_>,
        request: RedrawRequest,
    ) -> ChartResult<()> {
        let live = self
            .live
            .as_mut()
            .ok_or(ChartError::NoInstance { operation: "update" })?;

        assign_parts(&mut live.instance, changes, current);
        if let Err(err) = live.instance.update(request) {
            assign_parts(&mut live.instance, changes, live.snapshot.view());
            debug!(
                instance = %live.id,
                ?changes,
                error = %err,
                "update rejected; restored last applied configuration"
            );
            return Err(err);
        }
        live.snapshot = ConfigSnapshot::capture(current);
        Ok(())
    }
}

fn assign_parts<I: ChartInstance>(
    instance: &mut I,
    changes: ConfigChanges,
    source: ConfigurationView<'_>,
) {
    for change in changes.iter() {
        match change {
            ConfigChange::Labels => instance.set_labels(source.labels),
            ConfigChange::Datasets => instance.set_datasets(source.datasets),
            ConfigChange::Options => instance.set_options(source.options),
        }
    }
}

impl<E: DrawingEngine> Drop for InstanceManager<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn into_construction_error(err: ChartError) -> ChartError {
    match err {
        ChartError::EngineConstruction { .. } => err,
        other => ChartError::EngineConstruction {
            reason: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::InstanceManager;
    use crate::core::{ChartConfiguration, ChartType, SurfaceSize};
    use crate::engine::{RecordingEngine, SurfaceHandle, SurfaceId};
    use crate::error::ChartError;

    fn surface() -> SurfaceHandle {
        SurfaceHandle::new(SurfaceId(7), SurfaceSize::new(400, 300))
    }

    #[test]
    fn destroy_without_instance_is_noop() {
        let engine = RecordingEngine::new();
        let handle = engine.handle();
        let mut manager = InstanceManager::new(engine);
        assert!(!manager.destroy());
        assert_eq!(handle.call_count(), 0);
    }

    #[test]
    fn create_binds_and_destroy_releases_surface() {
        let surface = surface();
        let mut manager = InstanceManager::new(RecordingEngine::new());
        let id = manager
            .create(&surface, ChartConfiguration::new(ChartType::Bar))
            .expect("create");
        assert_eq!(surface.bound_instance(), Some(id));
        assert!(manager.destroy());
        assert_eq!(surface.bound_instance(), None);
    }

    #[test]
    fn second_create_without_destroy_is_stale() {
        let surface = surface();
        let mut manager = InstanceManager::new(RecordingEngine::new());
        manager
            .create(&surface, ChartConfiguration::new(ChartType::Line))
            .expect("create");
        let err = manager
            .create(&surface, ChartConfiguration::new(ChartType::Line))
            .expect_err("stale create must fail");
        assert!(matches!(err, ChartError::StaleInstance { surface } if surface == SurfaceId(7)));
    }

    #[test]
    fn invalid_surface_fails_construction_without_engine_call() {
        let engine = RecordingEngine::new();
        let handle = engine.handle();
        let mut manager = InstanceManager::new(engine);
        let surface = SurfaceHandle::new(SurfaceId(1), SurfaceSize::new(0, 100));
        let err = manager
            .create(&surface, ChartConfiguration::default())
            .expect_err("zero-width surface must fail");
        assert!(matches!(err, ChartError::EngineConstruction { .. }));
        assert_eq!(handle.construct_count(), 0);
        assert!(!manager.has_instance());
    }

    #[test]
    fn dropping_manager_destroys_live_instance() {
        let engine = RecordingEngine::new();
        let handle = engine.handle();
        let surface = surface();
        {
            let mut manager = InstanceManager::new(engine);
            manager
                .create(&surface, ChartConfiguration::default())
                .expect("create");
        }
        assert_eq!(handle.destroy_count(), 1);
        assert_eq!(surface.bound_instance(), None);
    }
}
