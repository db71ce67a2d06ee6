use std::fmt;
use thiserror::Error;

use crate::hedera::AccountId;

/// Form fields that can carry an inline validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prompt,
    NegativePrompt,
    Style,
    Collection,
    CollectionName,
    CollectionSymbol,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Prompt => "prompt",
            Field::NegativePrompt => "negative prompt",
            Field::Style => "style",
            Field::Collection => "collection",
            Field::CollectionName => "collection name",
            Field::CollectionSymbol => "collection symbol",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every failure the workflow can surface.
///
/// Collaborator variants carry the provider's message untouched so it can be
/// shown verbatim in the alert panel.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("{}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("A request is already in progress")]
    Busy,

    #[error("Clear the current artwork before generating a new one")]
    ArtifactPending,

    #[error("Action not available while {0}")]
    InvalidState(&'static str),

    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Ledger(String),

    #[error("No signer available for account {0}")]
    NoSigner(AccountId),

    #[error("{0}")]
    Transaction(String),

    #[error("{0}")]
    Wallet(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image data: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl MintError {
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            MintError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

pub type MintResult<T> = Result<T, MintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_joins_fields() {
        let err = MintError::Validation(vec![
            FieldError::new(Field::Prompt, "Positive prompt is required"),
            FieldError::new(Field::Style, "Unknown style"),
        ]);
        assert_eq!(err.to_string(), "Positive prompt is required; Unknown style");
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn provider_messages_are_verbatim() {
        let err = MintError::Generation("Invalid API key".to_string());
        assert_eq!(err.to_string(), "Invalid API key");
        assert!(err.field_errors().is_empty());
    }
}
