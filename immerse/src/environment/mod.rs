use immerse_api_rest::RestServerConfig;
use immerse_config::Config;
use immerse_core_contact_impl::ContactServiceConfig;
use immerse_core_health_impl::HealthServiceConfig;
use immerse_email_impl::SmtpRelayConfig;
use types::{Contact, Email, Health, RestServer, Template};

pub mod types;

/// Everything needed to build the services, derived from the [`Config`].
#[derive(Debug, Clone)]
pub struct Environment {
    rest_server_config: RestServerConfig,
    smtp_relay_config: SmtpRelayConfig,
    contact_service_config: ContactServiceConfig,
    health_service_config: HealthServiceConfig,
    template: Template,
}

impl Environment {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
        };

        let smtp_relay_config = SmtpRelayConfig {
            host: config.smtp.host.clone(),
            port: config.smtp.port,
            username: config.smtp.username.clone(),
            password: config.smtp.password.clone(),
            from: config.smtp.from.clone(),
        };

        let contact_service_config = ContactServiceConfig::new(config.contact.recipient.clone());

        let health_service_config = HealthServiceConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };

        Ok(Self {
            rest_server_config,
            smtp_relay_config,
            contact_service_config,
            health_service_config,
            template: Template::new()?,
        })
    }

    pub fn smtp_relay_config(&self) -> &SmtpRelayConfig {
        &self.smtp_relay_config
    }

    pub fn email(&self) -> Email {
        Email::new(self.smtp_relay_config.clone())
    }

    pub fn contact(&self) -> Contact {
        Contact::new(
            self.email(),
            self.template.clone(),
            self.contact_service_config.clone(),
        )
    }

    pub fn health(&self) -> Health {
        Health::new(self.email(), self.health_service_config.clone())
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health(),
            self.contact(),
            self.rest_server_config.clone(),
        )
    }
}
