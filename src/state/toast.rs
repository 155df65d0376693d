use crate::core::notification::{Notification, NotificationSink, SinkError};

/// Holds the notification currently shown on screen.
#[derive(Debug, Default)]
pub struct ToastQueue {
    current: Option<Notification>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, notification: &Notification) -> Result<(), SinkError> {
        self.current = Some(notification.clone());
        Ok(())
    }
}
