use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::warn;

const NO_REMEMBER_KEY: &str = "colorfest_no_remember";
const SESSION_ACTIVE_KEY: &str = "colorfest_session_active";
const REMINDERS_ENABLED_KEY: &str = "colorfest_reminders_enabled";

/// Small key-value store for per-user flags, the durable flavor living in a
/// JSON file under the data directory. Writes are best effort: losing a
/// flag degrades to its default, it never breaks the application.
pub trait IKvStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub struct InMemoryKvStore {
    data: Mutex<HashMap<String, String>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IKvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.data.lock().unwrap().remove(key);
    }
}

pub struct FileKvStore {
    path: PathBuf,
    data: Mutex<HashMap<String, String>>,
}

impl FileKvStore {
    pub fn load(path: PathBuf) -> anyhow::Result<Self> {
        let data = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    fn persist(&self, data: &HashMap<String, String>) {
        let write = serde_json::to_string_pretty(data)
            .map_err(anyhow::Error::from)
            .and_then(|raw| std::fs::write(&self.path, raw).map_err(anyhow::Error::from));
        if let Err(e) = write {
            warn!("Could not persist key-value store to {:?}: {}", self.path, e);
        }
    }
}

impl IKvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut data = self.data.lock().unwrap();
        data.insert(key.to_string(), value.to_string());
        self.persist(&data);
    }

    fn remove(&self, key: &str) {
        let mut data = self.data.lock().unwrap();
        data.remove(key);
        self.persist(&data);
    }
}

/// Typed view over the two flag stores: `local` survives restarts, while
/// `session` lives only as long as this process.
#[derive(Clone)]
pub struct Preferences {
    local: Arc<dyn IKvStore>,
    session: Arc<dyn IKvStore>,
}

impl Preferences {
    pub fn new(local: Arc<dyn IKvStore>, session: Arc<dyn IKvStore>) -> Self {
        Self { local, session }
    }

    pub fn inmemory() -> Self {
        Self::new(
            Arc::new(InMemoryKvStore::new()),
            Arc::new(InMemoryKvStore::new()),
        )
    }

    /// Set when a login explicitly declined to be remembered.
    pub fn no_remember(&self) -> bool {
        self.local.get(NO_REMEMBER_KEY).as_deref() == Some("true")
    }

    pub fn set_no_remember(&self, value: bool) {
        if value {
            self.local.set(NO_REMEMBER_KEY, "true");
        } else {
            self.local.remove(NO_REMEMBER_KEY);
        }
    }

    /// Marker that this process already went through session restore once.
    pub fn session_active(&self) -> bool {
        self.session.get(SESSION_ACTIVE_KEY).is_some()
    }

    pub fn mark_session_active(&self) {
        self.session.set(SESSION_ACTIVE_KEY, "true");
    }

    /// Event reminders are on unless the user switched them off.
    pub fn reminders_enabled(&self) -> bool {
        match self.local.get(REMINDERS_ENABLED_KEY) {
            None => true,
            Some(value) => value == "true",
        }
    }

    pub fn set_reminders_enabled(&self, value: bool) {
        self.local
            .set(REMINDERS_ENABLED_KEY, if value { "true" } else { "false" });
    }
}
