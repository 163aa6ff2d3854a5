use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::SurfaceSize;

use super::InstanceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

#[derive(Debug)]
struct SurfaceState {
    size: Cell<SurfaceSize>,
    bound_instance: Cell<Option<InstanceId>>,
}

/// Already-resolved drawing surface (canvas) handed over by the host.
///
/// Clones refer to the same surface: size changes and instance binding are
/// visible through every clone, which is how a second binding attempt on a
/// surface that still carries a live instance gets detected.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    id: SurfaceId,
    state: Rc<SurfaceState>,
}

impl SurfaceHandle {
    #[must_use]
    pub fn new(id: SurfaceId, size: SurfaceSize) -> Self {
        Self {
            id,
            state: Rc::new(SurfaceState {
                size: Cell::new(size),
                bound_instance: Cell::new(None),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.state.size.get()
    }

    /// Records a new container size. Engines pick it up on `resize`.
    pub fn set_size(&self, size: SurfaceSize) {
        self.state.size.set(size);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.size().is_valid()
    }

    #[must_use]
    pub fn bound_instance(&self) -> Option<InstanceId> {
        self.state.bound_instance.get()
    }

    pub(crate) fn bind(&self, instance: InstanceId) {
        self.state.bound_instance.set(Some(instance));
    }

    /// Clears the binding only if it still belongs to `instance`.
    pub(crate) fn release(&self, instance: InstanceId) {
        if self.state.bound_instance.get() == Some(instance) {
            self.state.bound_instance.set(None);
        }
    }
}
