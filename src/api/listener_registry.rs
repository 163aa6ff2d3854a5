use crate::engine::{ChartEventListener, DrawingEngine};
use crate::error::{ChartError, ChartResult};

use super::ChartComponent;

impl<E: DrawingEngine> ChartComponent<E> {
    /// Registers a listener with unique identifier.
    ///
    /// Listeners outlive individual chart instances and keep receiving
    /// events after a rebuild.
    pub fn register_listener(&mut self, listener: Box<dyn ChartEventListener>) -> ChartResult<()> {
        self.manager
            .listeners()
            .try_borrow_mut()
            .map_err(|_| ChartError::ListenersBusy {
                operation: "register_listener",
            })?
            .register(listener)
    }

    /// Unregisters a listener by id. Returns `true` when removed.
    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        self.manager
            .listeners()
            .try_borrow_mut()
            .is_ok_and(|mut listeners| listeners.unregister(listener_id))
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.manager
            .listeners()
            .try_borrow()
            .map_or(0, |listeners| listeners.len())
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.manager
            .listeners()
            .try_borrow()
            .is_ok_and(|listeners| listeners.contains(listener_id))
    }
}
