use anyhow::anyhow;
use lettre::{
    message::{header, MessageBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_email_contracts::{Email, EmailService};
use portfolio_models::email_address::EmailAddressWithName;
use portfolio_utils::Apply;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddressWithName,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    pub fn new(url: &str, from: EmailAddressWithName) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        Message::builder()
            .from(self.from.0.clone())
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let recipient = email.recipient.email().to_owned();
        let message = self.build_message(email)?;

        let response = self.transport.send(message).await?;
        debug!(%recipient, code = %response.code(), "smtp server answered");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sut() -> EmailServiceImpl {
        EmailServiceImpl::new(
            "smtp://127.0.0.1:2525",
            "Portfolio <portfolio@example.com>".parse().unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn build_text_message_with_reply_to() {
        let message = sut()
            .build_message(Email {
                recipient: "truong@example.com".parse().unwrap(),
                subject: "The Subject".into(),
                body: "Hello World!".into(),
                reply_to: Some("max@example.de".parse().unwrap()),
            })
            .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(formatted.contains("From: Portfolio <portfolio@example.com>\r\n"));
        assert!(formatted.contains("To: truong@example.com\r\n"));
        assert!(formatted.contains("Reply-To: max@example.de\r\n"));
        assert!(formatted.contains("Subject: The Subject\r\n"));
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(formatted.contains("\r\n\r\nHello World!"));
    }

    #[tokio::test]
    async fn build_message_without_reply_to() {
        let message = sut()
            .build_message(Email {
                recipient: "truong@example.com".parse().unwrap(),
                subject: "The Subject".into(),
                body: "Hello World!".into(),
                reply_to: None,
            })
            .unwrap();

        let formatted = String::from_utf8(message.formatted()).unwrap();
        assert!(!formatted.contains("Reply-To:"));
        assert!(formatted.contains("To: truong@example.com\r\n"));
    }
}
