use colorfest_app::Application;
use colorfest_domain::{Identity, Session};
use colorfest_infra::{Config, Context, Preferences, RealSys, Repos};
use std::sync::Arc;
use wiremock::MockServer;

/// Builds the application against a mock REST backend. Tests mount the
/// collection responses they need on the returned server before driving
/// the services.
pub async fn spawn_app() -> (Application, MockServer, Session) {
    let server = MockServer::start().await;

    let config = Config {
        api_base_url: server.uri(),
        api_anon_key: "anon-test-key".into(),
        data_dir: std::env::temp_dir(),
        stored_session: None,
    };
    let context = Context {
        repos: Repos::create_rest(&config),
        config,
        prefs: Preferences::inmemory(),
        sys: Arc::new(RealSys {}),
    };
    let app = Application::new(context);

    let session = Session::new(
        Identity {
            id: Default::default(),
            email: "ada@example.com".into(),
        },
        Some("user-access-token".into()),
    );

    (app, server, session)
}
