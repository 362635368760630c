use std::{
    sync::Arc,
    thread::{self, JoinHandle},
};

use tracing::{debug, warn};

use crate::{
    message_bus::{ListenerId, MessageBus},
    sync_state::{CHANNEL_NAME, SyncMessage, SyncState},
};

/// The writing side of the channel. Sends the full state on every call.
pub struct Controller {
    bus: Arc<dyn MessageBus>,
    available: bool,
}

impl Controller {
    #[must_use]
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        let available = bus.is_available();
        if !available {
            debug!("broadcast unavailable; controller state stays local");
        }
        Controller { bus, available }
    }

    pub fn is_connected(&self) -> bool {
        self.available
    }

    /// Best effort. Failures are logged and otherwise ignored.
    pub fn publish(&self, state: SyncState) {
        if !self.available {
            return;
        }

        let payload = match SyncMessage::from(state).encode() {
            Ok(payload) => payload,
            Err(err) => {
                warn!("{err}");
                return;
            }
        };

        match self.bus.post(CHANNEL_NAME, &payload) {
            Ok(()) => debug!(weight = %state.weight, bar = %state.bar_kind, "published state"),
            Err(err) => warn!("Failed to publish plate state: {err}"),
        }
    }
}

pub struct Receiver {
    bus: Arc<dyn MessageBus>,
    available: bool,
}

impl Receiver {
    #[must_use]
    pub fn new(bus: Arc<dyn MessageBus>) -> Self {
        let available = bus.is_available();
        if !available {
            debug!("broadcast unavailable; receiver will not get updates");
        }
        Receiver { bus, available }
    }

    pub fn is_connected(&self) -> bool {
        self.available
    }

    /// Calls `on_update` from a background thread for every `UPDATE` message,
    /// in arrival order. Other messages are dropped.
    ///
    /// The channel stays open until the returned [`Subscription`] is closed or
    /// dropped.
    pub fn subscribe<F>(&self, mut on_update: F) -> Subscription
    where
        F: FnMut(SyncState) + Send + 'static,
    {
        if !self.available {
            return Subscription::inert();
        }

        let listener = match self.bus.listen(CHANNEL_NAME) {
            Ok(listener) => listener,
            Err(err) => {
                warn!("Failed to open sync channel: {err}");
                return Subscription::inert();
            }
        };
        let id = listener.id;

        let handle = thread::Builder::new()
            .name("plate-sync-receiver".to_string())
            .spawn(move || {
                for payload in listener.messages {
                    match SyncMessage::decode(&payload) {
                        Ok(SyncMessage::Update { weight, bar_type }) => {
                            on_update(SyncState::new(weight, bar_type));
                        }
                        Ok(SyncMessage::Unknown) => debug!("ignoring unrecognised sync message"),
                        Err(err) => debug!("ignoring sync payload: {err}"),
                    }
                }
            });

        match handle {
            Ok(handle) => Subscription {
                bus: Some(Arc::clone(&self.bus)),
                id,
                handle: Some(handle),
            },
            Err(err) => {
                warn!("Failed to start sync receiver thread: {err}");
                self.bus.unlisten(CHANNEL_NAME, id);
                Subscription::inert()
            }
        }
    }
}

/// Keeps a receiver's channel handle open. Releases it when dropped.
pub struct Subscription {
    bus: Option<Arc<dyn MessageBus>>,
    id: ListenerId,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    fn inert() -> Self {
        Subscription {
            bus: None,
            id: ListenerId(0),
            handle: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.bus.is_some()
    }

    /// Stops listening. Messages already delivered are still handed to the
    /// callback before this returns.
    pub fn close(&mut self) {
        if let Some(bus) = self.bus.take() {
            bus.unlisten(CHANNEL_NAME, self.id);
        }

        if let Some(handle) = self.handle.take() {
            // Closing from inside the callback must not wait on itself.
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if handle.join().is_err() {
                warn!("sync receiver thread panicked");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}
