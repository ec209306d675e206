use crate::session::SessionResolver;
use colorfest_domain::{Favorite, Session, ID};
use colorfest_infra::Context;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("No signed in user")]
    NotSignedIn,
    #[error("A toggle for event {0} is already in flight")]
    ToggleInFlight(ID),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug)]
pub enum ToggleOutcome {
    Added(Favorite),
    Removed,
}

/// The signed in user's favorites, mirrored from the backend. The local set
/// only changes after the corresponding remote call succeeded, so a failed
/// request leaves local and remote state in agreement.
pub struct FavoritesStore {
    ctx: Arc<Context>,
    session: Arc<SessionResolver>,
    favorites: Mutex<Vec<Favorite>>,
    /// Event ids with a toggle round trip outstanding. A second toggle on
    /// the same event is rejected until the first resolves.
    in_flight: Mutex<HashSet<ID>>,
}

impl FavoritesStore {
    pub fn new(ctx: Arc<Context>, session: Arc<SessionResolver>) -> Self {
        Self {
            ctx,
            session,
            favorites: Mutex::new(Vec::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Refreshes the local set from the backend. Without a signed in user
    /// the set is simply cleared. A failed fetch keeps the previous set.
    pub async fn load(&self) -> Result<(), FavoritesError> {
        let session = match self.session.session() {
            Some(session) => session,
            None => {
                self.favorites.lock().unwrap().clear();
                return Ok(());
            }
        };
        let favorites = self.ctx.repos.favorites.find_by_user(&session).await?;
        *self.favorites.lock().unwrap() = favorites;
        Ok(())
    }

    pub fn is_favorite(&self, event_id: &ID) -> bool {
        self.favorites
            .lock()
            .unwrap()
            .iter()
            .any(|f| &f.event_id == event_id)
    }

    pub fn get_note(&self, event_id: &ID) -> String {
        self.favorites
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.event_id == event_id)
            .map(|f| f.note.clone())
            .unwrap_or_default()
    }

    pub fn event_ids(&self) -> Vec<ID> {
        self.favorites
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.event_id.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.favorites.lock().unwrap().len()
    }

    /// Adds or removes the favorite for `event_id`, deciding on the local
    /// set's membership. At most one toggle per event may be in flight.
    pub async fn toggle(&self, event_id: &ID) -> Result<ToggleOutcome, FavoritesError> {
        let session = self.session.session().ok_or(FavoritesError::NotSignedIn)?;

        if !self.in_flight.lock().unwrap().insert(event_id.clone()) {
            return Err(FavoritesError::ToggleInFlight(event_id.clone()));
        }
        let res = self.toggle_inner(&session, event_id).await;
        self.in_flight.lock().unwrap().remove(event_id);
        res
    }

    async fn toggle_inner(
        &self,
        session: &Session,
        event_id: &ID,
    ) -> Result<ToggleOutcome, FavoritesError> {
        let existing = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.event_id == event_id)
            .cloned();

        match existing {
            Some(favorite) => {
                self.ctx
                    .repos
                    .favorites
                    .delete(session, &favorite.id)
                    .await?;
                self.favorites
                    .lock()
                    .unwrap()
                    .retain(|f| f.id != favorite.id);
                Ok(ToggleOutcome::Removed)
            }
            None => {
                let created = self.ctx.repos.favorites.insert(session, event_id).await?;
                self.favorites.lock().unwrap().push(created.clone());
                Ok(ToggleOutcome::Added(created))
            }
        }
    }

    /// Updates the note on the favorite for `event_id`, when there is one.
    pub async fn update_note(&self, event_id: &ID, note: &str) -> Result<(), FavoritesError> {
        let session = self.session.session().ok_or(FavoritesError::NotSignedIn)?;

        let existing = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.event_id == event_id)
            .cloned();
        let favorite = match existing {
            Some(favorite) => favorite,
            None => return Ok(()),
        };

        self.ctx
            .repos
            .favorites
            .update_note(&session, &favorite.id, note)
            .await?;
        let mut favorites = self.favorites.lock().unwrap();
        if let Some(f) = favorites.iter_mut().find(|f| f.id == favorite.id) {
            f.note = note.to_string();
        }
        Ok(())
    }
}
