use super::IFavoriteRepo;
use anyhow::anyhow;
use colorfest_domain::{Favorite, Session, ID};
use std::collections::HashMap;
use std::sync::Mutex;

/// Favorites store backed by a per-user map, used by tests.
pub struct InMemoryFavoriteRepo {
    favorites: Mutex<HashMap<ID, Vec<Favorite>>>,
}

impl InMemoryFavoriteRepo {
    pub fn new() -> Self {
        Self {
            favorites: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryFavoriteRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IFavoriteRepo for InMemoryFavoriteRepo {
    async fn find_by_user(&self, session: &Session) -> anyhow::Result<Vec<Favorite>> {
        let favorites = self.favorites.lock().unwrap();
        Ok(favorites
            .get(&session.identity.id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert(&self, session: &Session, event_id: &ID) -> anyhow::Result<Favorite> {
        let favorite = Favorite::new(event_id.clone());
        let mut favorites = self.favorites.lock().unwrap();
        favorites
            .entry(session.identity.id.clone())
            .or_insert_with(Vec::new)
            .push(favorite.clone());
        Ok(favorite)
    }

    async fn update_note(
        &self,
        session: &Session,
        favorite_id: &ID,
        note: &str,
    ) -> anyhow::Result<()> {
        let mut favorites = self.favorites.lock().unwrap();
        let user_favorites = favorites
            .get_mut(&session.identity.id)
            .ok_or_else(|| anyhow!("No favorites for user"))?;
        let favorite = user_favorites
            .iter_mut()
            .find(|f| &f.id == favorite_id)
            .ok_or_else(|| anyhow!("No favorite with id: {}", favorite_id))?;
        favorite.note = note.to_string();
        Ok(())
    }

    async fn delete(&self, session: &Session, favorite_id: &ID) -> anyhow::Result<()> {
        let mut favorites = self.favorites.lock().unwrap();
        let user_favorites = favorites
            .get_mut(&session.identity.id)
            .ok_or_else(|| anyhow!("No favorites for user"))?;
        user_favorites.retain(|f| &f.id != favorite_id);
        Ok(())
    }
}
