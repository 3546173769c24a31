//! Mail error types

use lettre::address::AddressError;
use thiserror::Error;

/// Errors found when checking message parts before dispatch
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The subject was never set, or is blank
    #[error("message subject needs to be set")]
    MissingSubject,

    /// Neither an HTML nor a plain text body was set
    #[error("an HTML or plain text message part needs to be set")]
    MissingBody,
}

/// Errors raised while resolving or rendering a mail template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template exists at the resolved path
    #[error("template {0} not found")]
    TemplateNotFound(String),

    /// The template exists but lacks a required section
    #[error("section {section} missing from template {template}")]
    SectionNotFound {
        /// The resolved template path
        template: String,

        /// The section that could not be rendered
        section: String,
    },

    /// Any other rendering fault
    #[error(transparent)]
    Render(anyhow::Error),
}

/// Errors raised by a mail transport during delivery
#[derive(Debug, Error)]
pub enum TransportError {
    /// An address could not be parsed by the transport
    #[error("invalid email address")]
    InvalidAddress,

    /// The transport refused the message
    #[error("message rejected by the transport: {0}")]
    Rejected(String),

    /// Any other transport fault
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for TransportError {
    fn from(err: anyhow::Error) -> Self {
        TransportError::Other(err)
    }
}

impl From<AddressError> for TransportError {
    fn from(_err: AddressError) -> Self {
        TransportError::InvalidAddress
    }
}

/// Errors returned by the terminal send operation
#[derive(Debug, Error)]
pub enum SendError {
    /// The message parts were incomplete; nothing was dispatched
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport failed to deliver the assembled message
    #[error(transparent)]
    Transport(#[from] TransportError),
}
