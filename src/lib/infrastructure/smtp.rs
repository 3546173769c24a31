//! SMTP transport implementation

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{header::ContentType, Mailbox as SmtpMailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    Address, Message, SmtpTransport, Transport as _,
};
use tracing::debug;

use crate::domain::mail::{Mailbox, OutgoingMessage, Transport, TransportError};

/// SMTP configuration
#[derive(Clone, Default, Debug, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT")]
    pub port: u16,

    /// The SMTP username
    #[clap(long, env = "SMTP_USER")]
    pub username: String,

    /// The SMTP password
    #[clap(long, env = "SMTP_PASSWORD")]
    pub password: String,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection)
    #[clap(long, env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,
}

/// SMTP mailer delivering assembled messages over a relay.
#[derive(Debug, Default, Clone)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Creates a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Builds the relay transport from the configuration
    fn relay(&self) -> Result<SmtpTransport> {
        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let relay = if self.config.starttls {
            SmtpTransport::starttls_relay(&self.config.host)?
        } else {
            SmtpTransport::relay(&self.config.host)?
        };

        Ok(relay
            .credentials(creds)
            .port(self.config.port)
            .tls(Tls::Opportunistic(
                TlsParameters::builder(self.config.host.to_string())
                    .dangerous_accept_invalid_certs(!self.config.verify_tls)
                    .build()?,
            ))
            .build())
    }
}

fn mailbox(mailbox: &Mailbox) -> Result<SmtpMailbox, TransportError> {
    let address: Address = mailbox.address.parse()?;

    Ok(SmtpMailbox::new(mailbox.name.clone(), address))
}

fn build_email(message: &OutgoingMessage) -> Result<Message, TransportError> {
    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone());

    if let Some(reply_to) = &message.reply_to {
        builder = builder.reply_to(reply_to.parse()?);
    }

    for to in &message.to {
        builder = builder.to(to.parse()?);
    }

    for bcc in &message.bcc {
        builder = builder.bcc(mailbox(bcc)?);
    }

    let email = match (&message.body_html, &message.body_text) {
        (Some(html), Some(text)) => builder.multipart(MultiPart::alternative_plain_html(
            text.clone(),
            html.clone(),
        )),
        (Some(html), None) => builder
            .header(ContentType::TEXT_HTML)
            .body(html.clone()),
        (None, Some(text)) => builder
            .header(ContentType::TEXT_PLAIN)
            .body(text.clone()),
        (None, None) => return Err(TransportError::Other(anyhow!("message has no body"))),
    };

    email.map_err(|err| TransportError::Other(err.into()))
}

#[async_trait]
impl Transport for SmtpMailer {
    async fn deliver(&self, message: &OutgoingMessage) -> Result<usize, TransportError> {
        let email = build_email(message)?;
        let relay = self.relay().map_err(TransportError::Other)?;

        debug!(
            host = %self.config.host,
            recipients = message.recipient_count(),
            "delivering message over smtp"
        );

        match relay.send(&email) {
            Ok(_) => Ok(message.recipient_count()),
            Err(err) if err.is_permanent() || err.is_transient() => {
                Err(TransportError::Rejected(err.to_string()))
            }
            Err(err) => Err(TransportError::Other(err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn message() -> OutgoingMessage {
        OutgoingMessage {
            subject: "Hi".to_string(),
            from: Mailbox {
                address: "no-reply@example.com".to_string(),
                name: Some("Example Co".to_string()),
            },
            reply_to: Some("support@example.com".to_string()),
            to: vec!["user@example.com".to_string()],
            bcc: vec![Mailbox {
                address: "audit@example.com".to_string(),
                name: None,
            }],
            body_html: Some("<p>hi</p>".to_string()),
            body_text: Some("hi".to_string()),
        }
    }

    #[test]
    fn test_build_email_includes_all_addresses() -> TestResult {
        let email = build_email(&message())?;
        let rendered = String::from_utf8(email.formatted())?;

        assert!(rendered.contains("no-reply@example.com"));
        assert!(rendered.contains("Example Co"));
        assert!(rendered.contains("Reply-To: support@example.com"));
        assert!(rendered.contains("To: user@example.com"));

        Ok(())
    }

    #[test]
    fn test_bcc_recipients_ride_the_envelope_but_not_the_headers() -> TestResult {
        let email = build_email(&message())?;
        let rendered = String::from_utf8(email.formatted())?;

        assert!(!rendered.contains("audit@example.com"));
        assert!(email
            .envelope()
            .to()
            .iter()
            .any(|address| address.to_string() == "audit@example.com"));

        Ok(())
    }

    #[test]
    fn test_both_bodies_produce_a_multipart_alternative() -> TestResult {
        let email = build_email(&message())?;
        let rendered = String::from_utf8(email.formatted())?;

        assert!(rendered.contains("multipart/alternative"));

        Ok(())
    }

    #[test]
    fn test_html_only_message_is_a_single_html_part() -> TestResult {
        let mut html_only = message();
        html_only.body_text = None;

        let email = build_email(&html_only)?;
        let rendered = String::from_utf8(email.formatted())?;

        assert!(rendered.contains("Content-Type: text/html"));
        assert!(!rendered.contains("multipart/alternative"));

        Ok(())
    }

    #[tokio::test]
    async fn test_connection_failure_is_not_a_rejection() {
        // nothing listens on port 1, so the connection fails before any
        // server response exists to be rejected
        let mailer = SmtpMailer::new(SmtpConfig {
            host: "127.0.0.1".to_string(),
            port: 1,
            starttls: false,
            ..SmtpConfig::default()
        });

        let result = mailer.deliver(&message()).await;

        assert!(matches!(result, Err(TransportError::Other(_))));
    }

    #[test]
    fn test_unparsable_from_address_is_rejected() {
        let mut bad_from = message();
        bad_from.from.address = "not an address".to_string();

        let result = build_email(&bad_from);

        assert!(matches!(result, Err(TransportError::InvalidAddress)));
    }
}
