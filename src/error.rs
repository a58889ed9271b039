//! Error types shared by the translation engine.

use crate::translation::ProviderId;

/// Errors raised while handling a single chat event.
///
/// None of these are fatal to the process: the router logs them and moves on
/// to the next event.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A translation backend failed (transport, HTTP status, or payload).
    #[error("{provider} provider failed: {message}")]
    Provider {
        provider: ProviderId,
        message: String,
        /// Raw backend response, kept for diagnostics.
        response: Option<String>,
    },

    /// Invalid policy arguments or a language a provider cannot serve.
    #[error("{0}")]
    Configuration(String),

    /// The config file could not be rewritten after a policy change.
    #[error("failed to persist policies: {0:#}")]
    Persistence(#[source] anyhow::Error),

    /// The chat client rejected an edit/delete/fetch call.
    #[error("chat transport error: {0:#}")]
    Transport(#[source] anyhow::Error),
}

impl Error {
    pub(crate) fn provider(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            response: None,
        }
    }

    pub(crate) fn provider_with_response(
        provider: ProviderId,
        message: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider,
            message: message.into(),
            response: Some(response.into()),
        }
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
