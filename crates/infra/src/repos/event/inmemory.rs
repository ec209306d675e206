use super::IEventRepo;
use colorfest_domain::{FestivalEvent, ID};
use std::sync::Mutex;

/// Programme store backed by a plain vector, used by tests.
pub struct InMemoryEventRepo {
    events: Mutex<Vec<FestivalEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, event: FestivalEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Default for InMemoryEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn find_active_by_ids(&self, event_ids: &[ID]) -> anyhow::Result<Vec<FestivalEvent>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.is_active && event_ids.contains(&e.id))
            .cloned()
            .collect())
    }
}
