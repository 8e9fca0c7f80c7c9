use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::models::Reading;
use crate::plugins::trackers::PriceTracker;
use crate::plugins::traits::Notifier;
use crate::utils::error::NotifyError;

/// Sends alerts through an authenticated implicit-TLS SMTP relay.
pub struct EmailNotifier {
    config: SmtpConfig,
    tracker: PriceTracker,
}

impl EmailNotifier {
    pub fn new(config: SmtpConfig, tracker: PriceTracker) -> Self {
        EmailNotifier { config, tracker }
    }

    fn format_subject(&self, reading: &Reading) -> String {
        format!("Price Alert: {}", reading.title)
    }

    fn format_text_body(&self, reading: &Reading) -> String {
        format!(
            "Price dropped to {}!\nCheck the product here: {}",
            self.tracker.format(reading.price),
            reading.url
        )
    }

    pub fn build_message(&self, reading: &Reading) -> Result<Message, NotifyError> {
        let from: Mailbox = self.config.username.parse()?;
        let to: Mailbox = self.config.to_address.parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(self.format_subject(reading))
            .header(ContentType::TEXT_PLAIN)
            .body(self.format_text_body(reading))?;

        Ok(message)
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let credentials = Credentials::new(self.config.username.clone(), self.config.password.clone());

        // relay() negotiates TLS on connect, as port 465 expects
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        Ok(mailer)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, reading: &Reading) -> Result<(), NotifyError> {
        let message = self.build_message(reading)?;
        let mailer = self.transport()?;

        let response = mailer.send(message).await?;
        tracing::debug!("SMTP server answered {:?}", response.code());
        Ok(())
    }
}
