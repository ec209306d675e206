use super::IEventRepo;
use crate::rest::{Filter, RestClient};
use chrono::DateTime;
use colorfest_domain::{FestivalEvent, ID};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

pub struct RestEventRepo {
    client: Arc<RestClient>,
}

impl RestEventRepo {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct EventRaw {
    id: ID,
    title: String,
    artist: Option<String>,
    start_time: Option<String>,
    stage: Option<String>,
    #[serde(default)]
    is_active: bool,
}

impl From<EventRaw> for FestivalEvent {
    fn from(raw: EventRaw) -> Self {
        let start_time = raw.start_time.as_deref().and_then(|s| {
            match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => Some(dt.timestamp_millis()),
                Err(_) => {
                    warn!("Unparseable start_time `{}` on event {}", s, raw.id);
                    None
                }
            }
        });
        FestivalEvent {
            id: raw.id,
            title: raw.title,
            artist: raw.artist,
            start_time,
            stage: raw.stage,
            is_active: raw.is_active,
        }
    }
}

#[async_trait::async_trait]
impl IEventRepo for RestEventRepo {
    async fn find_active_by_ids(&self, event_ids: &[ID]) -> anyhow::Result<Vec<FestivalEvent>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = Filter::new()
            .any_of("id", event_ids)
            .is_true("is_active")
            .select(&["id", "title", "artist", "start_time", "stage", "is_active"]);
        let rows: Vec<EventRaw> = self.client.fetch_many("events", &filter, None).await?;
        Ok(rows.into_iter().map(|raw| raw.into()).collect())
    }
}
