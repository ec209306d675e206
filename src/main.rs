mod telemetry;

use colorfest_app::Application;
use colorfest_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("colorfest".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context()?;

    let app = Application::new(context);
    app.start().await
}
