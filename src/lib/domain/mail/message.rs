//! Mail message model

use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// An email address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// The email address
    pub address: String,

    /// The display name shown alongside the address
    pub name: Option<String>,
}

/// The rendered parts of a message being composed.
///
/// Populated atomically from a template or field by field through the
/// builder setters; whichever write happens last for a field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParts {
    /// The subject line
    pub subject: Option<String>,

    /// The HTML body
    pub body_html: Option<String>,

    /// The plain text body
    pub body_text: Option<String>,
}

impl MessageParts {
    /// Checks that the parts form a sendable message: a non-blank subject
    /// and at least one non-blank body.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if Self::is_blank(&self.subject) {
            return Err(ValidationError::MissingSubject);
        }

        if Self::is_blank(&self.body_html) && Self::is_blank(&self.body_text) {
            return Err(ValidationError::MissingBody);
        }

        Ok(())
    }

    fn is_blank(part: &Option<String>) -> bool {
        part.as_deref().map_or(true, |value| value.trim().is_empty())
    }
}

/// The primary recipients of a single send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// Consumes the set, yielding the addresses in the order given.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Recipients {
    fn from(address: &str) -> Self {
        Self(vec![address.to_string()])
    }
}

impl From<String> for Recipients {
    fn from(address: String) -> Self {
        Self(vec![address])
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addresses: Vec<String>) -> Self {
        Self(addresses)
    }
}

impl From<Vec<&str>> for Recipients {
    fn from(addresses: Vec<&str>) -> Self {
        Self(addresses.into_iter().map(String::from).collect())
    }
}

/// A fully assembled message, built once per send and handed to the
/// transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// The subject line
    pub subject: String,

    /// The sender mailbox
    pub from: Mailbox,

    /// The reply-to address, when one was configured
    pub reply_to: Option<String>,

    /// The primary recipient addresses
    pub to: Vec<String>,

    /// The blind carbon copy mailboxes
    pub bcc: Vec<Mailbox>,

    /// The HTML part, when one was set
    pub body_html: Option<String>,

    /// The plain text part, when a non-blank one was set
    pub body_text: Option<String>,
}

impl OutgoingMessage {
    /// The number of mailboxes this message is addressed to, visible or not.
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.bcc.len()
    }
}
