use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, MutexGuard,
        mpsc::{self, Receiver, Sender},
    },
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to encode sync message: {0}")]
    Encode(serde_json::Error),
    #[error("Failed to decode sync message: {0}")]
    Decode(serde_json::Error),
    #[error("Broadcast is not available in this context.")]
    Unavailable,
    #[error("Message bus state was poisoned by a panicking thread.")]
    Poisoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug)]
pub struct Listener {
    pub id: ListenerId,
    pub messages: Receiver<String>,
}

/// A named-channel broadcast facility shared between execution contexts.
///
/// Posting is fire-and-forget: it returns once the payload is queued for every
/// listener currently registered, without waiting for anyone to read it.
pub trait MessageBus: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    /// # Errors
    fn post(&self, channel: &str, payload: &str) -> Result<(), SyncError>;

    /// # Errors
    fn listen(&self, channel: &str) -> Result<Listener, SyncError>;

    /// Closes a handle returned by [`MessageBus::listen`]. Its receiver sees the
    /// end of the stream once pending messages are drained.
    fn unlisten(&self, channel: &str, id: ListenerId);
}

#[derive(Default)]
struct Channels {
    next_id: u64,
    listeners: HashMap<String, Vec<(ListenerId, Sender<String>)>>,
}

impl Channels {
    fn retain<F>(&mut self, channel: &str, keep: F)
    where
        F: FnMut(&(ListenerId, Sender<String>)) -> bool,
    {
        if let Some(listeners) = self.listeners.get_mut(channel) {
            listeners.retain(keep);
            if listeners.is_empty() {
                self.listeners.remove(channel);
            }
        }
    }
}

/// In-process bus. Clones share the same channels, so handing a clone to each
/// thread connects them.
#[derive(Clone, Default)]
pub struct LocalBus {
    channels: Arc<Mutex<Channels>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn listener_count(&self, channel: &str) -> usize {
        self.lock()
            .map(|channels| channels.listeners.get(channel).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Channels>, SyncError> {
        self.channels.lock().map_err(|_| SyncError::Poisoned)
    }
}

impl MessageBus for LocalBus {
    fn post(&self, channel: &str, payload: &str) -> Result<(), SyncError> {
        let mut channels = self.lock()?;
        channels.retain(channel, |(_, sender)| sender.send(payload.to_string()).is_ok());
        Ok(())
    }

    fn listen(&self, channel: &str) -> Result<Listener, SyncError> {
        let mut channels = self.lock()?;
        let id = ListenerId(channels.next_id);
        channels.next_id += 1;

        let (sender, messages) = mpsc::channel();
        channels
            .listeners
            .entry(channel.to_string())
            .or_default()
            .push((id, sender));

        Ok(Listener { id, messages })
    }

    fn unlisten(&self, channel: &str, id: ListenerId) {
        if let Ok(mut channels) = self.lock() {
            channels.retain(channel, |(listener, _)| *listener != id);
        }
    }
}

/// Stands in for a host without a broadcast facility.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableBus;

impl MessageBus for UnavailableBus {
    fn is_available(&self) -> bool {
        false
    }

    fn post(&self, _channel: &str, _payload: &str) -> Result<(), SyncError> {
        Err(SyncError::Unavailable)
    }

    fn listen(&self, _channel: &str) -> Result<Listener, SyncError> {
        Err(SyncError::Unavailable)
    }

    fn unlisten(&self, _channel: &str, _id: ListenerId) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fans_out_to_every_listener_in_order() {
        let bus = LocalBus::new();
        let first = bus.listen("plates").unwrap();
        let second = bus.listen("plates").unwrap();

        bus.post("plates", "a").unwrap();
        bus.post("plates", "b").unwrap();

        for listener in [first, second] {
            assert_eq!(listener.messages.try_iter().collect::<Vec<_>>(), vec!["a", "b"]);
        }
    }

    #[test]
    fn channels_are_isolated() {
        let bus = LocalBus::new();
        let listener = bus.listen("plates").unwrap();
        bus.post("other", "a").unwrap();
        assert!(listener.messages.try_recv().is_err());
    }

    #[test]
    fn posting_without_listeners_succeeds() {
        assert!(LocalBus::new().post("plates", "a").is_ok());
    }

    #[test]
    fn unlisten_ends_the_stream() {
        let bus = LocalBus::new();
        let listener = bus.listen("plates").unwrap();
        bus.post("plates", "a").unwrap();
        bus.unlisten("plates", listener.id);

        assert_eq!(bus.listener_count("plates"), 0);
        assert!(!bus.channels.lock().unwrap().listeners.contains_key("plates"));
        assert_eq!(listener.messages.iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn dropped_receivers_are_pruned_on_post() {
        let bus = LocalBus::new();
        drop(bus.listen("plates").unwrap());
        bus.post("plates", "a").unwrap();
        assert_eq!(bus.listener_count("plates"), 0);
        assert!(!bus.channels.lock().unwrap().listeners.contains_key("plates"));
    }

    #[test]
    fn unavailable_bus_refuses_everything() {
        let bus = UnavailableBus;
        assert!(!bus.is_available());
        assert!(matches!(bus.post("plates", "a"), Err(SyncError::Unavailable)));
        assert!(matches!(bus.listen("plates"), Err(SyncError::Unavailable)));
    }
}
