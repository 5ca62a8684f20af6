use portfolio_config::Config;
use portfolio_email_contracts::EmailService;
use tracing::info;

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = environment::email_service(&config.email)?;
    email.ping().await?;

    let server = environment::rest_server(&config, email);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
