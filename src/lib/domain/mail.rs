//! Mail composition module.

mod composer;
mod errors;
mod factory;
mod message;
mod templates;
mod translation;
mod transport;

pub use composer::{MessageBuilder, MAIL_TEMPLATE_DIR, MAIL_TEMPLATE_SUFFIX};
pub use errors::{SendError, TemplateError, TransportError, ValidationError};
pub use factory::MailFactory;
pub use message::{Mailbox, MessageParts, OutgoingMessage, Recipients};
pub use templates::{TemplateEngine, TemplateParams, TemplateRef};
pub use translation::Translator;
pub use transport::Transport;
