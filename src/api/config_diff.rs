use serde::{Deserialize, Serialize};

use crate::core::{ChartType, ConfigurationView};

/// Part of the configuration that can be patched onto a live instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigChange {
    Labels,
    Datasets,
    Options,
}

impl ConfigChange {
    pub const ALL: [Self; 3] = [Self::Labels, Self::Datasets, Self::Options];

    const fn bit(self) -> u8 {
        match self {
            Self::Labels => 1 << 0,
            Self::Datasets => 1 << 1,
            Self::Options => 1 << 2,
        }
    }
}

/// Set of dirty configuration parts; several of them still cost one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigChanges {
    bits: u8,
}

impl ConfigChanges {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: ConfigChange::Labels.bit()
                | ConfigChange::Datasets.bit()
                | ConfigChange::Options.bit(),
        }
    }

    #[must_use]
    pub const fn from_change(change: ConfigChange) -> Self {
        Self { bits: change.bit() }
    }

    #[must_use]
    pub const fn with_change(self, change: ConfigChange) -> Self {
        Self {
            bits: self.bits | change.bit(),
        }
    }

    #[must_use]
    pub const fn contains(self, change: ConfigChange) -> bool {
        (self.bits & change.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ConfigChange> {
        ConfigChange::ALL
            .into_iter()
            .filter(move |change| self.contains(*change))
    }
}

/// Result of comparing the applied snapshot with the declared configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigDiff {
    Unchanged,
    /// Chart type differs; the instance must be destroyed and rebuilt.
    Rebuild { from: ChartType, to: ChartType },
    /// Same chart type; the listed parts are patched in place.
    Update(ConfigChanges),
}

impl ConfigDiff {
    #[must_use]
    pub fn is_unchanged(self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Structural diff between two configurations.
///
/// A type change pre-empts every other comparison because a rebuild
/// re-establishes labels, datasets and options anyway.
#[must_use]
pub fn diff_configuration(
    previous: ConfigurationView<'_>,
    current: ConfigurationView<'_>,
) -> ConfigDiff {
    if previous.chart_type != current.chart_type {
        return ConfigDiff::Rebuild {
            from: previous.chart_type,
            to: current.chart_type,
        };
    }

    let mut changes = ConfigChanges::none();
    if previous.labels != current.labels {
        changes = changes.with_change(ConfigChange::Labels);
    }
    if previous.datasets != current.datasets {
        changes = changes.with_change(ConfigChange::Datasets);
    }
    if previous.options != current.options {
        changes = changes.with_change(ConfigChange::Options);
    }

    if changes.is_none() {
        ConfigDiff::Unchanged
    } else {
        ConfigDiff::Update(changes)
    }
}
