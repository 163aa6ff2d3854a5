use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{ElementList, Point, SurfaceSize};
use crate::error::{ChartError, ChartResult};

use super::InstanceId;

/// Outward notification channel fed by engine callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventChannel {
    Click,
    Hover,
    Resize,
}

impl EventChannel {
    const fn bit(self) -> u8 {
        match self {
            Self::Click => 1 << 0,
            Self::Hover => 1 << 1,
            Self::Resize => 1 << 2,
        }
    }
}

/// Bitmask of channels a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventChannels {
    bits: u8,
}

impl EventChannels {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: EventChannel::Click.bit()
                | EventChannel::Hover.bit()
                | EventChannel::Resize.bit(),
        }
    }

    #[must_use]
    pub const fn from_channel(channel: EventChannel) -> Self {
        Self {
            bits: channel.bit(),
        }
    }

    #[must_use]
    pub const fn with_channel(self, channel: EventChannel) -> Self {
        Self {
            bits: self.bits | channel.bit(),
        }
    }

    #[must_use]
    pub const fn contains(self, channel: EventChannel) -> bool {
        (self.bits & channel.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }
}

/// Payload of click and hover callbacks: pointer position plus the active
/// elements the engine resolved under it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionPayload {
    pub point: Option<Point>,
    pub elements: ElementList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizePayload {
    pub size: SurfaceSize,
}

/// Notification forwarded unmodified from the engine to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    Click(InteractionPayload),
    Hover(InteractionPayload),
    Resize(ResizePayload),
}

impl ChartEvent {
    #[must_use]
    pub fn channel(&self) -> EventChannel {
        match self {
            Self::Click(_) => EventChannel::Click,
            Self::Hover(_) => EventChannel::Hover,
            Self::Resize(_) => EventChannel::Resize,
        }
    }
}

/// Host-side observer of chart notifications.
///
/// Listeners belong to the component, not to an instance, so they keep
/// receiving events across rebuilds.
pub trait ChartEventListener {
    fn id(&self) -> &str;

    fn channels(&self) -> EventChannels {
        EventChannels::all()
    }

    fn on_event(&mut self, event: &ChartEvent);
}

/// Listener backed by a closure, for hosts that only need a callback.
pub struct CallbackListener<F> {
    id: String,
    channels: EventChannels,
    callback: F,
}

impl<F> CallbackListener<F>
where
    F: FnMut(&ChartEvent),
{
    pub fn new(id: impl Into<String>, channels: EventChannels, callback: F) -> Self {
        Self {
            id: id.into(),
            channels,
            callback,
        }
    }
}

impl<F> ChartEventListener for CallbackListener<F>
where
    F: FnMut(&ChartEvent),
{
    fn id(&self) -> &str {
        &self.id
    }

    fn channels(&self) -> EventChannels {
        self.channels
    }

    fn on_event(&mut self, event: &ChartEvent) {
        (self.callback)(event);
    }
}

#[derive(Default)]
pub(crate) struct ListenerSet {
    listeners: Vec<Box<dyn ChartEventListener>>,
}

impl ListenerSet {
    pub(crate) fn register(&mut self, listener: Box<dyn ChartEventListener>) -> ChartResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(ChartError::InvalidData(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.contains(&listener_id) {
            return Err(ChartError::InvalidData(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    pub(crate) fn unregister(&mut self, listener_id: &str) -> bool {
        if let Some(position) = self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            self.listeners.remove(position);
            return true;
        }
        false
    }

    pub(crate) fn contains(&self, listener_id: &str) -> bool {
        self.listeners
            .iter()
            .any(|listener| listener.id() == listener_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    fn dispatch(&mut self, event: &ChartEvent) -> usize {
        let channel = event.channel();
        let mut delivered = 0;
        for listener in &mut self.listeners {
            if listener.channels().contains(channel) {
                listener.on_event(event);
                delivered += 1;
            }
        }
        delivered
    }
}

/// Callback wiring handed to the engine at construction.
///
/// Every clone shares one attachment flag; once the owning instance is
/// destroyed the sink is detached and late engine callbacks are dropped.
#[derive(Clone)]
pub struct EventSink {
    instance_id: InstanceId,
    listeners: Rc<RefCell<ListenerSet>>,
    attached: Rc<Cell<bool>>,
}

impl EventSink {
    pub(crate) fn new(instance_id: InstanceId, listeners: Rc<RefCell<ListenerSet>>) -> Self {
        Self {
            instance_id,
            listeners,
            attached: Rc::new(Cell::new(true)),
        }
    }

    #[must_use]
    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub(crate) fn detach(&self) {
        self.attached.set(false);
    }

    pub fn click(&self, payload: InteractionPayload) -> bool {
        self.emit(ChartEvent::Click(payload))
    }

    pub fn hover(&self, payload: InteractionPayload) -> bool {
        self.emit(ChartEvent::Hover(payload))
    }

    pub fn resize(&self, payload: ResizePayload) -> bool {
        self.emit(ChartEvent::Resize(payload))
    }

    /// Forwards `event` to every subscribed listener.
    ///
    /// Returns `false` when the event was dropped: the sink is detached or a
    /// listener re-entered the sink while it was dispatching.
    pub fn emit(&self, event: ChartEvent) -> bool {
        if !self.is_attached() {
            trace!(
                instance = %self.instance_id,
                channel = ?event.channel(),
                "dropping event from detached instance"
            );
            return false;
        }
        let Ok(mut listeners) = self.listeners.try_borrow_mut() else {
            warn!(
                instance = %self.instance_id,
                channel = ?event.channel(),
                "dropping re-entrant chart event"
            );
            return false;
        };
        let delivered = listeners.dispatch(&event);
        trace!(
            instance = %self.instance_id,
            channel = ?event.channel(),
            delivered,
            "chart event forwarded"
        );
        true
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("instance_id", &self.instance_id)
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}
