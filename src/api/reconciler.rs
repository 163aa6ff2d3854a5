use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ChartType, ConfigurationView};
use crate::engine::{DrawingEngine, InstanceId};
use crate::error::ChartResult;

use super::{ChartComponent, ConfigChanges, ConfigDiff, diff_configuration};

/// What one reconciliation pass did to the live instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconcileOutcome {
    /// No live instance; creation belongs to the mount hook.
    Skipped,
    /// Declared configuration equals the snapshot; no engine call was made.
    Unchanged,
    /// Dirty parts were patched in place with a single update call.
    Updated(ConfigChanges),
    /// Chart type changed; the instance was destroyed and rebuilt.
    Rebuilt {
        from: ChartType,
        to: ChartType,
        instance: InstanceId,
    },
}

/// Running counters over all reconciliation passes of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub checks: u64,
    pub skipped: u64,
    pub unchanged: u64,
    pub updates: u64,
    pub rebuilds: u64,
    pub failures: u64,
}

impl ReconcileStats {
    fn record(&mut self, outcome: &ChartResult<ReconcileOutcome>) {
        self.checks += 1;
        match outcome {
            Ok(ReconcileOutcome::Skipped) => self.skipped += 1,
            Ok(ReconcileOutcome::Unchanged) => self.unchanged += 1,
            Ok(ReconcileOutcome::Updated(_)) => self.updates += 1,
            Ok(ReconcileOutcome::Rebuilt { .. }) => self.rebuilds += 1,
            Err(_) => self.failures += 1,
        }
    }
}

impl<E: DrawingEngine> ChartComponent<E> {
    /// Brings the live instance in line with the public fields.
    ///
    /// Safe to call any number of times: an unchanged configuration costs no
    /// engine call. Engine failures propagate and leave the snapshot where it
    /// was, so the next pass retries the same diff.
    pub fn reconcile(&mut self) -> ChartResult<ReconcileOutcome> {
        let current = ConfigurationView {
            chart_type: self.chart_type,
            labels: &self.labels,
            datasets: &self.datasets,
            options: &self.options,
        };

        let diff = self
            .manager
            .snapshot()
            .map(|snapshot| diff_configuration(snapshot.view(), current));

        let outcome = match diff {
            None => {
                trace!("reconcile skipped: no live chart instance");
                Ok(ReconcileOutcome::Skipped)
            }
            Some(ConfigDiff::Unchanged) => Ok(ReconcileOutcome::Unchanged),
            Some(ConfigDiff::Rebuild { from, to }) => {
                debug!(from = %from, to = %to, "chart type changed, rebuilding instance");
                self.manager
                    .rebuild(&self.surface, current.to_configuration())
                    .map(|instance| ReconcileOutcome::Rebuilt { from, to, instance })
            }
            Some(ConfigDiff::Update(changes)) => {
                debug!(?changes, "applying configuration changes in place");
                self.manager
                    .apply_update(changes, current, self.reconcile_redraw)
                    .map(|()| ReconcileOutcome::Updated(changes))
            }
        };

        if let Err(err) = &outcome {
            warn!(error = %err, "reconciliation failed, snapshot not advanced");
        }
        self.stats.record(&outcome);
        outcome
    }

    /// Diff the next `reconcile` would act on, without touching the engine.
    #[must_use]
    pub fn pending_diff(&self) -> Option<ConfigDiff> {
        self.manager
            .snapshot()
            .map(|snapshot| diff_configuration(snapshot.view(), self.configuration_view()))
    }
}
