use thiserror::Error;

/// Errors that can occur when selecting a scheme by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("unknown integration scheme `{name}`, expected one of: {}", .available.join(", "))]
    UnknownScheme {
        name: String,
        available: Vec<&'static str>,
    },

    #[error("invalid configuration for scheme `{scheme}`: {reason}")]
    InvalidConfig {
        scheme: &'static str,
        reason: String,
    },

    #[error("no integration scheme configured for `{phi}`")]
    MissingEntry { phi: String },
}

/// Errors that can occur when registering a scheme factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("scheme name must not be empty")]
    EmptyName,

    #[error("a scheme named `{name}` is already registered")]
    Duplicate { name: &'static str },
}
