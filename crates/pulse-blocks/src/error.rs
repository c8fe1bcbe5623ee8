//! Error types for pulse-blocks

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid marker {name}: {reason}")]
    InvalidMarker { name: String, reason: String },

    #[error("Payload for {region} contains the literal {literal:?}")]
    PayloadContainsMarker { region: String, literal: String },

    #[error("Payload for {region} matches the {element} pattern")]
    PayloadMatchesElement { region: String, element: String },

    #[error("Payload for element {name} must match its pattern exactly once, found {matches}")]
    ElementPayloadMismatch { name: String, matches: usize },

    #[error("Invalid element pattern: {0}")]
    Pattern(#[from] regex::Error),
}
