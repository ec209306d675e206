mod inmemory;
mod rest;

pub use inmemory::InMemoryEventRepo;
pub use rest::RestEventRepo;

use colorfest_domain::{FestivalEvent, ID};

/// Read-only access to the festival programme. Events are written by the
/// content management side, never from here.
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// The currently active events among `event_ids`, projected down to the
    /// fields reminder evaluation needs.
    async fn find_active_by_ids(&self, event_ids: &[ID]) -> anyhow::Result<Vec<FestivalEvent>>;
}
