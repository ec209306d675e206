use crate::shared::entity::{Entity, ID};

/// An in-session alert shown in the notification inbox. Notifications are
/// ephemeral: they live in memory and die with the process.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Creation instant in millis since the epoch.
    pub timestamp: i64,
    pub read: bool,
}

impl Notification {
    pub fn new(title: String, description: Option<String>, timestamp: i64) -> Self {
        Self {
            id: Default::default(),
            title,
            description,
            timestamp,
            read: false,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
