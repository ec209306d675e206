use crate::shared::entity::{Entity, ID};

/// A user's bookmark on a `FestivalEvent`, with an optional free-text note.
/// The backend enforces at most one favorite per (user, event) pair through
/// the toggle semantics of the favorites store.
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    pub id: ID,
    pub event_id: ID,
    pub note: String,
}

impl Favorite {
    pub fn new(event_id: ID) -> Self {
        Self {
            id: Default::default(),
            event_id,
            note: String::new(),
        }
    }
}

impl Entity for Favorite {
    fn id(&self) -> &ID {
        &self.id
    }
}
