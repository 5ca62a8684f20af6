use std::sync::Arc;

use anyhow::Context;
use portfolio_config::{Config, EmailConfig};
use portfolio_core_contact_impl::{
    email::{ContactDeliveryConfig, EmailContactDeliveryServiceImpl},
    ContactServiceImpl,
};
use portfolio_email_impl::EmailServiceImpl;

pub type Email = EmailServiceImpl;
pub type ContactDelivery = EmailContactDeliveryServiceImpl<Email>;
pub type Contact = ContactServiceImpl<ContactDelivery>;
pub type RestServer = portfolio_api_rest::RestServer<Contact>;

/// Set up the SMTP transport. Connections are opened lazily on first use.
pub fn email_service(config: &EmailConfig) -> anyhow::Result<Email> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .with_context(|| format!("Invalid smtp url {:?}", config.smtp_url))
}

pub fn contact_service(config: &Config, email: Email) -> Contact {
    let delivery_config = ContactDeliveryConfig {
        recipient: Arc::new(config.contact.recipient.clone()),
        subject_prefix: config.contact.subject_prefix.as_str().into(),
        timeout: config.contact.delivery_timeout.into(),
    };

    ContactServiceImpl::new(EmailContactDeliveryServiceImpl::new(
        email,
        delivery_config,
    ))
}

pub fn rest_server(config: &Config, email: Email) -> RestServer {
    RestServer::new(contact_service(config, email))
}

#[cfg(test)]
mod tests {
    use portfolio_config::DEFAULT_CONFIG_PATH;

    use super::*;

    #[tokio::test]
    async fn provide_rest_server() {
        let config = portfolio_config::load_paths(&[DEFAULT_CONFIG_PATH]).unwrap();
        let email = email_service(&config.email).unwrap();

        let _: RestServer = rest_server(&config, email);
    }
}
