mod inmemory;
mod rest;

pub use inmemory::InMemoryFavoriteRepo;
pub use rest::RestFavoriteRepo;

use colorfest_domain::{Favorite, Session, ID};

/// Access to a user's favorites. All operations run with the session's
/// credentials; the backend scopes rows to the session's user.
#[async_trait::async_trait]
pub trait IFavoriteRepo: Send + Sync {
    async fn find_by_user(&self, session: &Session) -> anyhow::Result<Vec<Favorite>>;
    /// Creates a favorite for `event_id` and returns the stored row,
    /// including its generated id.
    async fn insert(&self, session: &Session, event_id: &ID) -> anyhow::Result<Favorite>;
    async fn update_note(
        &self,
        session: &Session,
        favorite_id: &ID,
        note: &str,
    ) -> anyhow::Result<()>;
    async fn delete(&self, session: &Session, favorite_id: &ID) -> anyhow::Result<()>;
}
