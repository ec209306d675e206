use crate::shared::entity::{Entity, ID};

/// A festival programme entry. Events are owned and mutated by the content
/// management side; this crate only ever reads them.
#[derive(Debug, Clone)]
pub struct FestivalEvent {
    pub id: ID,
    pub title: String,
    pub artist: Option<String>,
    /// Start instant in millis since the epoch. Unscheduled events have no
    /// start time and are never eligible for reminders.
    pub start_time: Option<i64>,
    pub stage: Option<String>,
    pub is_active: bool,
}

impl Entity for FestivalEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl FestivalEvent {
    /// The name shown to the user, preferring the artist over the title.
    pub fn display_name(&self) -> &str {
        self.artist.as_deref().unwrap_or(&self.title)
    }

    /// Whole minutes (rounded) until this event starts, when the start lies
    /// strictly in the future and within `window_millis` of `now`.
    pub fn starts_within(&self, now: i64, window_millis: i64) -> Option<i64> {
        let start = self.start_time?;
        let delta = start - now;
        if delta > 0 && delta <= window_millis {
            Some((delta as f64 / 60_000f64).round() as i64)
        } else {
            None
        }
    }
}
