//! Host-facing component: configuration surface, reconciler, instance
//! manager and forwarding facade.

mod component;
mod component_config;
mod component_snapshot;
mod config_diff;
mod config_snapshot;
mod facade;
mod instance_manager;
mod lifecycle;
mod listener_registry;
mod reconciler;

pub use component::{ChartComponent, LifecyclePhase};
pub use component_config::ChartComponentConfig;
pub use component_snapshot::{
    COMPONENT_SNAPSHOT_JSON_SCHEMA_V1, ComponentSnapshot, ComponentSnapshotJsonContractV1,
};
pub use config_diff::{ConfigChange, ConfigChanges, ConfigDiff, diff_configuration};
pub use config_snapshot::ConfigSnapshot;
pub use instance_manager::InstanceManager;
pub use lifecycle::ComponentLifecycle;
pub use reconciler::{ReconcileOutcome, ReconcileStats};
