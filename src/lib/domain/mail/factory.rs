//! Mail factory

use std::sync::Arc;

use tracing::debug;

use super::{
    composer::MessageBuilder, errors::TransportError, message::OutgoingMessage,
    templates::TemplateEngine, translation::Translator, transport::Transport,
};

/// Central place configuring the default sender identity and holding the
/// collaborators every message needs.
///
/// The factory hands out one [`MessageBuilder`] per outgoing email, seeded
/// with the configured from identity and reply-to address. Builder overrides
/// never write back to the factory.
#[derive(Debug)]
pub struct MailFactory<T, E, L>
where
    T: Transport,
    E: TemplateEngine,
    L: Translator,
{
    transport: Arc<T>,
    templates: Arc<E>,
    translator: Arc<L>,
    from_address: Option<String>,
    from_name: Option<String>,
    reply_to: Option<String>,
}

impl<T, E, L> MailFactory<T, E, L>
where
    T: Transport,
    E: TemplateEngine,
    L: Translator,
{
    /// Creates a factory around the given collaborators, with no sender
    /// identity configured yet.
    pub fn new(transport: Arc<T>, templates: Arc<E>, translator: Arc<L>) -> Self {
        Self {
            transport,
            templates,
            translator,
            from_address: None,
            from_name: None,
            reply_to: None,
        }
    }

    /// Sets the default from address and name.
    ///
    /// Address syntax is not checked here; that is the transport's concern.
    pub fn configure_sender(&mut self, from_address: &str, from_name: &str) {
        self.from_address = Some(from_address.to_string());
        self.from_name = Some(from_name.to_string());
    }

    /// Sets the default reply-to address.
    pub fn configure_reply_to(&mut self, reply_to: &str) -> &mut Self {
        self.reply_to = Some(reply_to.to_string());

        self
    }

    /// Creates a builder for one outgoing email, seeded with the configured
    /// from identity and reply-to address.
    pub fn builder(&self) -> MessageBuilder<'_, T, E, L> {
        let mut builder = MessageBuilder::new(self);

        if let Some(address) = &self.from_address {
            builder = builder.from(address, self.from_name.as_deref());
        }

        if let Some(reply_to) = &self.reply_to {
            builder = builder.reply_to(reply_to);
        }

        builder
    }

    /// Hands an assembled message to the transport.
    ///
    /// # Returns
    /// The transport's acceptance count, with any transport fault passed
    /// through unchanged.
    pub async fn dispatch(&self, message: &OutgoingMessage) -> Result<usize, TransportError> {
        debug!(
            subject = %message.subject,
            recipients = message.recipient_count(),
            "dispatching message"
        );

        self.transport.deliver(message).await
    }

    /// The translation service used for sender fields.
    pub fn translator(&self) -> &L {
        &self.translator
    }

    /// The engine used to render mail templates.
    pub fn templates(&self) -> &E {
        &self.templates
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::mail::{
        tests::{MockTemplateEngine, MockTranslator, MockTransport},
        Mailbox, OutgoingMessage,
    };

    use super::*;

    fn passthrough_translator() -> MockTranslator {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|key| key.to_string());
        translator
    }

    fn message() -> OutgoingMessage {
        OutgoingMessage {
            subject: "Hi".to_string(),
            from: Mailbox {
                address: "no-reply@example.com".to_string(),
                name: Some("Example Co".to_string()),
            },
            reply_to: None,
            to: vec!["user@example.com".to_string()],
            bcc: vec![],
            body_html: Some("<p>hi</p>".to_string()),
            body_text: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_forwards_to_the_transport() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_deliver()
            .times(1)
            .returning(|message| Ok(message.recipient_count()));

        let factory = MailFactory::new(
            Arc::new(transport),
            Arc::new(MockTemplateEngine::new()),
            Arc::new(passthrough_translator()),
        );

        assert_eq!(factory.dispatch(&message()).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_builder_is_seeded_with_configured_identity() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_deliver()
            .times(1)
            .withf(|message| {
                message.from.address == "no-reply@example.com"
                    && message.from.name.as_deref() == Some("Example Co")
                    && message.reply_to.as_deref() == Some("support@example.com")
            })
            .returning(|_| Ok(1));

        let mut factory = MailFactory::new(
            Arc::new(transport),
            Arc::new(MockTemplateEngine::new()),
            Arc::new(passthrough_translator()),
        );

        factory.configure_sender("no-reply@example.com", "Example Co");
        factory.configure_reply_to("support@example.com");

        factory
            .builder()
            .subject("Hi")
            .body_html("<p>hi</p>")
            .send("user@example.com")
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_builder_from_an_unconfigured_factory_has_no_reply_to() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_deliver()
            .times(1)
            .withf(|message| message.reply_to.is_none() && message.from.address.is_empty())
            .returning(|_| Ok(1));

        let factory = MailFactory::new(
            Arc::new(transport),
            Arc::new(MockTemplateEngine::new()),
            Arc::new(passthrough_translator()),
        );

        factory
            .builder()
            .subject("Hi")
            .body_text("hello")
            .send("user@example.com")
            .await?;

        Ok(())
    }
}
