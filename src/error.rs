use thiserror::Error;

use crate::engine::SurfaceId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The surface or configuration was rejected while constructing an instance.
    #[error("engine construction failed: {reason}")]
    EngineConstruction { reason: String },

    /// A facade operation ran while no chart instance was live.
    #[error("no live chart instance for `{operation}`")]
    NoInstance { operation: &'static str },

    /// A new instance was requested on a surface still bound to a live one.
    #[error("surface {surface} is still bound to a live chart instance")]
    StaleInstance { surface: SurfaceId },

    #[error("engine call `{operation}` failed: {reason}")]
    EngineCall {
        operation: &'static str,
        reason: String,
    },

    /// The listener set was touched from inside one of its own callbacks.
    #[error("listeners are busy dispatching an event; `{operation}` rejected")]
    ListenersBusy { operation: &'static str },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
