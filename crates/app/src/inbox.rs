use colorfest_domain::Notification;
use colorfest_infra::ISys;
use std::sync::{Arc, Mutex};

/// Session-scoped list of notifications backing the bell badge and
/// dropdown. Newest first, nothing survives a restart.
pub struct NotificationInbox {
    sys: Arc<dyn ISys>,
    notifications: Mutex<Vec<Notification>>,
}

impl NotificationInbox {
    pub fn new(sys: Arc<dyn ISys>) -> Self {
        Self {
            sys,
            notifications: Mutex::new(Vec::new()),
        }
    }

    /// Prepends a new unread notification and returns it.
    pub fn add<T: Into<String>>(&self, title: T, description: Option<String>) -> Notification {
        let notification = Notification::new(
            title.into(),
            description,
            self.sys.get_timestamp_millis(),
        );
        self.notifications
            .lock()
            .unwrap()
            .insert(0, notification.clone());
        notification
    }

    pub fn mark_all_read(&self) {
        for notification in self.notifications.lock().unwrap().iter_mut() {
            notification.read = true;
        }
    }

    pub fn clear_all(&self) {
        self.notifications.lock().unwrap().clear();
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}
