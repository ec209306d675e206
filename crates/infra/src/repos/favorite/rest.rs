use super::IFavoriteRepo;
use crate::rest::{Filter, RestClient};
use colorfest_domain::{Favorite, Session, ID};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

pub struct RestFavoriteRepo {
    client: Arc<RestClient>,
}

impl RestFavoriteRepo {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct FavoriteRaw {
    id: ID,
    event_id: ID,
    note: Option<String>,
}

impl From<FavoriteRaw> for Favorite {
    fn from(raw: FavoriteRaw) -> Self {
        Favorite {
            id: raw.id,
            event_id: raw.event_id,
            note: raw.note.unwrap_or_default(),
        }
    }
}

#[async_trait::async_trait]
impl IFavoriteRepo for RestFavoriteRepo {
    async fn find_by_user(&self, session: &Session) -> anyhow::Result<Vec<Favorite>> {
        let filter = Filter::new()
            .eq("user_id", &session.identity.id)
            .select(&["id", "event_id", "note"]);
        let rows: Vec<FavoriteRaw> = self
            .client
            .fetch_many("user_favorites", &filter, session.token())
            .await?;
        Ok(rows.into_iter().map(|raw| raw.into()).collect())
    }

    async fn insert(&self, session: &Session, event_id: &ID) -> anyhow::Result<Favorite> {
        let row = json!({
            "user_id": session.identity.id,
            "event_id": event_id,
        });
        let created: FavoriteRaw = self
            .client
            .insert("user_favorites", &row, session.token())
            .await?;
        Ok(created.into())
    }

    async fn update_note(
        &self,
        session: &Session,
        favorite_id: &ID,
        note: &str,
    ) -> anyhow::Result<()> {
        let filter = Filter::new().eq("id", favorite_id);
        self.client
            .update(
                "user_favorites",
                &filter,
                &json!({ "note": note }),
                session.token(),
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, session: &Session, favorite_id: &ID) -> anyhow::Result<()> {
        let filter = Filter::new().eq("id", favorite_id);
        self.client
            .delete("user_favorites", &filter, session.token())
            .await?;
        Ok(())
    }
}
