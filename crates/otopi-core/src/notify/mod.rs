//! Notification Bus (§4.H): an ordered list of listeners dispatched lifecycle
//! events (`ERROR`, `REEXEC`).
use async_trait::async_trait;

pub mod error;
#[cfg(test)]
mod tests;

pub use error::NotificationError;

/// Lifecycle events the bus dispatches (§4.H).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    /// A handler raised; dispatched once per captured failure (§4.G).
    Error,
    /// The process is about to re-execute itself.
    Reexec,
}

impl NotifyEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NotifyEvent::Error => "ERROR",
            NotifyEvent::Reexec => "REEXEC",
        }
    }
}

/// A registered listener. A listener that itself fails during `ERROR`
/// dispatch is escalated to a fatal [`NotificationError`] (§4.H, §7).
#[async_trait]
pub trait Listener: Send + Sync {
    async fn notify(&self, event: &NotifyEvent) -> Result<(), String>;
}

pub type ListenerId = usize;

/// The Notification Bus itself: listeners fire in registration order.
#[derive(Default)]
pub struct NotificationBus {
    listeners: Vec<(ListenerId, Box<dyn Listener>)>,
    next_id: ListenerId,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self { listeners: Vec::new(), next_id: 0 }
    }

    pub fn register(&mut self, listener: Box<dyn Listener>) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Invokes every listener in order. A listener that fails escalates to a
    /// fatal `NotificationError` rather than being swallowed (§4.H).
    pub async fn notify(&self, event: NotifyEvent) -> Result<(), NotificationError> {
        for (_, listener) in &self.listeners {
            if let Err(message) = listener.notify(&event).await {
                return Err(NotificationError::ListenerFailed { event: event.name().to_string(), message });
            }
        }
        Ok(())
    }
}
