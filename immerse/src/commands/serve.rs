use immerse_config::Config;
use immerse_email_contracts::EmailService;
use tracing::{info, warn};

use crate::environment::Environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let environment = Environment::new(&config)?;

    if environment.smtp_relay_config().is_complete() {
        info!("Connecting to smtp server");
        if let Err(err) = environment.email().ping().await {
            warn!("Failed to reach smtp server, contact messages may not be delivered: {err:#}");
        }
    } else {
        warn!("SMTP relay configuration is incomplete, contact messages cannot be delivered");
    }

    environment.rest_server().serve().await
}
