use crate::core::{ChartConfiguration, ConfigurationView};

/// Last configuration successfully applied to the live instance.
///
/// Immutable once captured; the manager replaces it wholesale after every
/// successful construct or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSnapshot {
    configuration: ChartConfiguration,
}

impl ConfigSnapshot {
    #[must_use]
    pub(crate) fn new(configuration: ChartConfiguration) -> Self {
        Self { configuration }
    }

    #[must_use]
    pub(crate) fn capture(view: ConfigurationView<'_>) -> Self {
        Self::new(view.to_configuration())
    }

    #[must_use]
    pub fn view(&self) -> ConfigurationView<'_> {
        self.configuration.view()
    }

    #[must_use]
    pub fn configuration(&self) -> &ChartConfiguration {
        &self.configuration
    }
}
