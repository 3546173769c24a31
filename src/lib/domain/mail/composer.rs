//! Message builder

use super::{
    errors::{SendError, TemplateError},
    factory::MailFactory,
    message::{Mailbox, MessageParts, OutgoingMessage, Recipients},
    templates::{TemplateEngine, TemplateParams},
    translation::Translator,
    transport::Transport,
};

/// Directory prefix used when a template reference is not a full path.
pub const MAIL_TEMPLATE_DIR: &str = "mail/";

/// Template filename suffix marking a reference as a full path.
pub const MAIL_TEMPLATE_SUFFIX: &str = ".html.j2";

/// Builds and sends one outgoing email.
///
/// Obtained from [`MailFactory::builder`], mutated through chained setters in
/// any order, and consumed by [`send`](MessageBuilder::send). Taking the
/// builder by value in `send` makes reuse after a send impossible.
#[derive(Debug)]
pub struct MessageBuilder<'f, T, E, L>
where
    T: Transport,
    E: TemplateEngine,
    L: Translator,
{
    factory: &'f MailFactory<T, E, L>,
    from_address: Option<String>,
    from_name: Option<String>,
    reply_to: Option<String>,
    bcc: Vec<Mailbox>,
    parts: MessageParts,
}

impl<'f, T, E, L> MessageBuilder<'f, T, E, L>
where
    T: Transport,
    E: TemplateEngine,
    L: Translator,
{
    pub(crate) fn new(factory: &'f MailFactory<T, E, L>) -> Self {
        Self {
            factory,
            from_address: None,
            from_name: None,
            reply_to: None,
            bcc: Vec::new(),
            parts: MessageParts::default(),
        }
    }

    /// Overrides the from address and, when given, the from name for this
    /// message only. Both run through the translation lookup, so sender
    /// display names can be localized; an omitted name leaves the previous
    /// from name untouched.
    pub fn from(mut self, address: &str, name: Option<&str>) -> Self {
        let translator = self.factory.translator();

        self.from_address = Some(translator.translate(address));
        if let Some(name) = name {
            self.from_name = Some(translator.translate(name));
        }

        self
    }

    /// Overrides the reply-to address for this message only, translated like
    /// the from fields.
    pub fn reply_to(mut self, address: &str) -> Self {
        self.reply_to = Some(self.factory.translator().translate(address));

        self
    }

    /// Renders a template into the subject and body parts, overwriting all
    /// three regardless of what was set before.
    ///
    /// A reference without the engine suffix resolves inside the
    /// conventional mail template directory: `welcome` becomes
    /// `mail/welcome.html.j2`, while `custom/path.html.j2` is used as-is.
    /// Caller parameters are merged over the engine's globals before the
    /// `subject`, `body_html`, and `body_text` sections are rendered.
    pub fn template(
        mut self,
        reference: &str,
        parameters: TemplateParams,
    ) -> Result<Self, TemplateError> {
        let engine = self.factory.templates();

        let path = if reference.contains(MAIL_TEMPLATE_SUFFIX) {
            reference.to_string()
        } else {
            format!("{MAIL_TEMPLATE_DIR}{reference}{MAIL_TEMPLATE_SUFFIX}")
        };

        let template = engine.resolve(&path)?;
        let parameters = engine.merge_globals(parameters);

        self.parts.subject = Some(engine.render_section(&template, "subject", &parameters)?);
        self.parts.body_html = Some(engine.render_section(&template, "body_html", &parameters)?);
        self.parts.body_text = Some(engine.render_section(&template, "body_text", &parameters)?);

        Ok(self)
    }

    /// Sets the subject line, trimmed.
    pub fn subject(mut self, subject: &str) -> Self {
        self.parts.subject = Some(subject.trim().to_string());

        self
    }

    /// Sets the HTML body.
    pub fn body_html(mut self, content: impl Into<String>) -> Self {
        self.parts.body_html = Some(content.into());

        self
    }

    /// Sets the plain text body.
    pub fn body_text(mut self, content: impl Into<String>) -> Self {
        self.parts.body_text = Some(content.into());

        self
    }

    /// Adds a blind carbon copy recipient. Re-adding an address replaces its
    /// display name and keeps its position.
    pub fn add_bcc(mut self, address: &str, name: Option<&str>) -> Self {
        let name = name.map(str::to_string);

        match self.bcc.iter_mut().find(|entry| entry.address == address) {
            Some(entry) => entry.name = name,
            None => self.bcc.push(Mailbox {
                address: address.to_string(),
                name,
            }),
        }

        self
    }

    /// Validates the accumulated parts, assembles the message, and hands it
    /// to the factory for dispatch.
    ///
    /// # Arguments
    /// * `to` - One address or a list of addresses.
    ///
    /// # Returns
    /// The transport's acceptance count. Nothing reaches the transport when
    /// validation fails.
    pub async fn send(self, to: impl Into<Recipients>) -> Result<usize, SendError> {
        self.parts.validate()?;

        let factory = self.factory;
        let message = self.assemble(to.into());

        Ok(factory.dispatch(&message).await?)
    }

    /// Builds the outgoing message. The reply-to field is kept only when
    /// non-empty, the HTML part only when non-empty, and the plain text part
    /// only when non-blank after trimming, so a whitespace-only text part is
    /// never sent as an empty alternative.
    fn assemble(self, to: Recipients) -> OutgoingMessage {
        OutgoingMessage {
            subject: self.parts.subject.unwrap_or_default(),
            from: Mailbox {
                address: self.from_address.unwrap_or_default(),
                name: self.from_name,
            },
            reply_to: self.reply_to.filter(|address| !address.is_empty()),
            to: to.into_vec(),
            bcc: self.bcc,
            body_html: self.parts.body_html.filter(|html| !html.is_empty()),
            body_text: self
                .parts
                .body_text
                .filter(|text| !text.trim().is_empty()),
        }
    }
}
