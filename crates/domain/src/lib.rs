mod event;
mod favorite;
mod identity;
mod notification;
mod shared;

pub use event::FestivalEvent;
pub use favorite::Favorite;
pub use identity::{AuthState, Identity, Session};
pub use notification::Notification;
pub use shared::entity::{Entity, InvalidIDError, ID};
