mod config;
mod repos;
mod rest;
mod storage;
mod system;

pub use config::Config;
pub use repos::{
    IEventRepo, IFavoriteRepo, IRoleRepo, InMemoryEventRepo, InMemoryFavoriteRepo,
    InMemoryRoleRepo, Repos,
};
pub use rest::{ApiResponse, Filter, RequestError, RestClient};
pub use storage::{FileKvStore, IKvStore, InMemoryKvStore, Preferences};
pub use system::{ISys, RealSys};

use std::sync::Arc;

/// Everything the application services need to talk to the outside world:
/// typed collection access, configuration, local flag storage and a clock.
/// One instance is built at startup and shared by reference.
#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    pub config: Config,
    pub prefs: Preferences,
    pub sys: Arc<dyn ISys>,
}

impl Context {
    pub fn create(config: Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let local = FileKvStore::load(config.data_dir.join("storage.json"))?;
        let prefs = Preferences::new(Arc::new(local), Arc::new(InMemoryKvStore::new()));
        Ok(Self {
            repos: Repos::create_rest(&config),
            config,
            prefs,
            sys: Arc::new(RealSys {}),
        })
    }

    pub fn create_inmemory() -> Self {
        let config = Config {
            api_base_url: "http://localhost:54321".into(),
            api_anon_key: "anon".into(),
            data_dir: std::env::temp_dir(),
            stored_session: None,
        };
        Self {
            repos: Repos::create_inmemory(),
            config,
            prefs: Preferences::inmemory(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> anyhow::Result<Context> {
    Context::create(Config::new())
}
