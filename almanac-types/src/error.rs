use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Source;

/// Unified error type for the almanac workspace.
///
/// This wraps argument validation errors, provider-tagged transport failures,
/// timeouts, malformed payloads and not-found conditions. Failures are `Clone`
/// so a single outcome can be handed to every waiter of a shared computation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlmanacError {
    /// Invalid input argument (malformed date, inverted range, blank keyword, unknown sort).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A network-class failure reported by a provider (connection reset, 5xx, DNS).
    #[error("{provider} network error: {msg}")]
    Network {
        /// Provider name that failed.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
        /// Capability label (e.g. "weather", "news").
        capability: String,
    },

    /// The provider asked the caller to slow down.
    #[error("{provider} rate limited the request")]
    RateLimited {
        /// Provider name that throttled the call.
        provider: String,
    },

    /// Issues with the returned or expected data (missing fields, undecodable body).
    #[error("data issue: {0}")]
    Data(String),

    /// An individual provider returned a non-transient error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Provider name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource could not be found (e.g. unknown city for the weather lookup).
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource.
        what: String,
    },

    /// The overall request deadline elapsed.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// The orchestrator was built without a provider for a source.
    #[error("no provider registered for {kind}")]
    MissingProvider {
        /// Source lacking a provider.
        kind: Source,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl AlmanacError {
    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build a `Network` error tagged with the provider name.
    pub fn network(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Connector` error with the provider name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Returns true for network/timeout-class failures that are worth retrying.
    ///
    /// Validation problems, not-found conditions and malformed payloads will fail
    /// the same way on every attempt and are never retried.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::ProviderTimeout { .. } | Self::RateLimited { .. }
        )
    }

    /// Returns true if this error was caused by the caller's input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArg(_))
    }
}

impl From<serde_json::Error> for AlmanacError {
    fn from(e: serde_json::Error) -> Self {
        Self::Data(e.to_string())
    }
}

impl From<chrono::ParseError> for AlmanacError {
    fn from(e: chrono::ParseError) -> Self {
        Self::InvalidArg(e.to_string())
    }
}
