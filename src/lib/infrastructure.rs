//! Concrete collaborator implementations

pub mod smtp;
pub mod templates;
pub mod translation;
