//! Outbound SMTP mail transport.
//!
//! The transport is constructed once during process startup from `AppConfig`
//! and handed to route handlers through `AppState`. Nothing here is
//! initialized as a side effect of module import.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::Mailbox,
    transport::smtp::authentication::Credentials,
    transport::smtp::client::{Tls, TlsParameters},
};

use crate::config::AppConfig;

/// Shared SMTP transport plus the configured sender mailbox.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

#[derive(Debug)]
pub enum MailerError {
    Config(String),
    Transport(String),
}

impl std::fmt::Display for MailerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MailerError::Config(msg) => write!(f, "mailer configuration error: {msg}"),
            MailerError::Transport(msg) => write!(f, "mail transport error: {msg}"),
        }
    }
}

impl std::error::Error for MailerError {}

impl Mailer {
    /// Builds an authenticated TLS transport from the given configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, MailerError> {
        let tls = TlsParameters::new(config.smtp_host.clone())
            .map_err(|e| MailerError::Config(e.to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| MailerError::Config(e.to_string()))?
            .port(config.smtp_port)
            .tls(Tls::Required(tls))
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from = format!("{} <{}>", config.email_from_name, config.smtp_username)
            .parse()
            .map_err(|_| MailerError::Config("invalid sender address".into()))?;

        Ok(Self { transport, from })
    }

    /// Sender mailbox for message builders.
    pub fn from_mailbox(&self) -> Mailbox {
        self.from.clone()
    }

    pub async fn send(&self, message: Message) -> Result<(), MailerError> {
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailerError::Transport(e.to_string()))
    }
}
