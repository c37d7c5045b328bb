use async_trait::async_trait;

use crate::notify::{Listener, NotificationBus, NotifyEvent};

struct Recorder(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

#[async_trait]
impl Listener for Recorder {
    async fn notify(&self, event: &NotifyEvent) -> Result<(), String> {
        self.0.lock().unwrap().push(event.name().to_string());
        Ok(())
    }
}

struct Faulty;

#[async_trait]
impl Listener for Faulty {
    async fn notify(&self, _event: &NotifyEvent) -> Result<(), String> {
        Err("listener exploded".to_string())
    }
}

#[tokio::test]
async fn listeners_fire_in_registration_order() {
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut bus = NotificationBus::new();
    bus.register(Box::new(Recorder(seen.clone())));
    bus.register(Box::new(Recorder(seen.clone())));

    bus.notify(NotifyEvent::Error).await.unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["ERROR".to_string(), "ERROR".to_string()]);
}

#[tokio::test]
async fn a_failing_listener_escalates() {
    let mut bus = NotificationBus::new();
    bus.register(Box::new(Faulty));

    let err = bus.notify(NotifyEvent::Error).await.unwrap_err();
    assert!(err.to_string().contains("listener exploded"));
}

#[tokio::test]
async fn unregister_removes_a_listener() {
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let mut bus = NotificationBus::new();
    let id = bus.register(Box::new(Recorder(seen.clone())));
    assert!(bus.unregister(id));

    bus.notify(NotifyEvent::Reexec).await.unwrap();
    assert!(seen.lock().unwrap().is_empty());
}
