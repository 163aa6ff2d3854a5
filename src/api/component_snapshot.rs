use serde::{Deserialize, Serialize};

use crate::core::{ChartConfiguration, SurfaceSize};
use crate::engine::{DrawingEngine, InstanceId, SurfaceId};
use crate::error::{ChartError, ChartResult};

use super::{ChartComponent, ConfigDiff, LifecyclePhase, ReconcileStats};

pub const COMPONENT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable point-in-time view of a component, used by regression
/// tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub phase: LifecyclePhase,
    pub surface: SurfaceId,
    pub surface_size: SurfaceSize,
    pub instance: Option<InstanceId>,
    pub applied: Option<ChartConfiguration>,
    pub pending: Option<ConfigDiff>,
    pub listeners: usize,
    pub stats: ReconcileStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ComponentSnapshot,
}

impl ComponentSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ComponentSnapshotJsonContractV1 {
            schema_version: COMPONENT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both the bare snapshot and the versioned contract envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ComponentSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ComponentSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != COMPONENT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<E: DrawingEngine> ChartComponent<E> {
    #[must_use]
    pub fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot {
            phase: self.phase,
            surface: self.surface.id(),
            surface_size: self.surface.size(),
            instance: self.manager.instance_id(),
            applied: self.applied_configuration().cloned(),
            pending: self.pending_diff(),
            listeners: self.listener_count(),
            stats: self.stats,
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
