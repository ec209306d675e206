use colorfest_domain::{Identity, Session};
use std::path::PathBuf;
use tracing::{info, warn};

/// Application configuration, read once at startup and handed to the
/// components that need it. Nothing else in the codebase reads environment
/// variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted database's REST interface.
    pub api_base_url: String,
    /// Anonymous credential sent as `apikey` and as the bearer fallback on
    /// calls without a user token.
    pub api_anon_key: String,
    /// Directory holding the durable key-value store file.
    pub data_dir: PathBuf,
    /// Session restored at startup, when the process was handed one.
    pub stored_session: Option<Session>,
}

impl Config {
    pub fn new() -> Self {
        let api_base_url = std::env::var("COLORFEST_API_URL")
            .unwrap_or_else(|_| panic!("COLORFEST_API_URL env var to be present."));
        let api_anon_key = std::env::var("COLORFEST_API_KEY")
            .unwrap_or_else(|_| panic!("COLORFEST_API_KEY env var to be present."));

        let default_data_dir = "./data";
        let data_dir = match std::env::var("COLORFEST_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => {
                info!(
                    "Did not find COLORFEST_DATA_DIR environment variable. Falling back to: {}",
                    default_data_dir
                );
                PathBuf::from(default_data_dir)
            }
        };

        Self {
            api_base_url,
            api_anon_key,
            data_dir,
            stored_session: stored_session_from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// A session can be injected through the environment so the headless engine
/// starts signed in. All three variables must be present and the user id
/// must be well formed, otherwise the process starts anonymous.
fn stored_session_from_env() -> Option<Session> {
    let user_id = std::env::var("COLORFEST_USER_ID").ok()?;
    let email = std::env::var("COLORFEST_USER_EMAIL").ok()?;
    let access_token = std::env::var("COLORFEST_ACCESS_TOKEN").ok()?;

    let id = match user_id.parse() {
        Ok(id) => id,
        Err(_) => {
            warn!(
                "The given COLORFEST_USER_ID: {} is not a valid id, starting anonymous.",
                user_id
            );
            return None;
        }
    };

    Some(Session::new(Identity { id, email }, Some(access_token)))
}
