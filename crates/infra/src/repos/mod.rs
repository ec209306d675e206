mod event;
mod favorite;
mod role;

pub use event::{IEventRepo, InMemoryEventRepo};
pub use favorite::{IFavoriteRepo, InMemoryFavoriteRepo};
pub use role::{IRoleRepo, InMemoryRoleRepo};

use crate::config::Config;
use crate::rest::RestClient;
use event::RestEventRepo;
use favorite::RestFavoriteRepo;
use role::RestRoleRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub favorites: Arc<dyn IFavoriteRepo>,
    pub roles: Arc<dyn IRoleRepo>,
}

impl Repos {
    pub fn create_rest(config: &Config) -> Self {
        let client = Arc::new(RestClient::new(
            config.api_base_url.clone(),
            config.api_anon_key.clone(),
        ));
        Self {
            events: Arc::new(RestEventRepo::new(client.clone())),
            favorites: Arc::new(RestFavoriteRepo::new(client.clone())),
            roles: Arc::new(RestRoleRepo::new(client)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            favorites: Arc::new(InMemoryFavoriteRepo::new()),
            roles: Arc::new(InMemoryRoleRepo::new()),
        }
    }
}
