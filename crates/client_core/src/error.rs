use thiserror::Error;

/// Failure of a movie action. State is never patched when one is returned.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{action} failed: {source:#}")]
    Remote {
        action: &'static str,
        source: anyhow::Error,
    },
    #[error("{action} requires a movie with an id")]
    MissingId { action: &'static str },
}

impl ActionError {
    pub fn action(&self) -> &'static str {
        match self {
            Self::Remote { action, .. } | Self::MissingId { action } => action,
        }
    }
}
