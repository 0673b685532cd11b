use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tally workspace.
///
/// Covers missing identity signals, store failures (raw, timed out, or classified
/// by pipeline stage), duration-buffer exhaustion and argument validation.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TallyError {
    /// The visit carries no usable identity signal.
    #[error("insufficient signal: {what}")]
    InsufficientSignal {
        /// Description of the missing signal, e.g. "publisher identity for custom visit".
        what: String,
    },

    /// Looking up a publisher failed; the resolver recovers by treating it as not found.
    #[error("lookup failed for {key}: {msg}")]
    LookupFailure {
        /// Publisher or media key being looked up.
        key: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Persisting a publisher failed.
    #[error("save failed for {key}: {msg}")]
    SaveFailure {
        /// Publisher key being saved.
        key: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A store implementation returned an error.
    #[error("{store} failed: {msg}")]
    Store {
        /// Store name that failed.
        store: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A store call exceeded the configured timeout.
    #[error("store timed out: {op} via {store}")]
    StoreTimeout {
        /// Store name that timed out.
        store: String,
        /// Operation label (e.g. "lookup_publisher", "save_publisher").
        op: String,
    },

    /// The duration buffer is full; the update was not held.
    #[error("pending duration buffer full: capacity={capacity}")]
    PendingBufferFull {
        /// Configured capacity in media keys.
        capacity: usize,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl TallyError {
    /// Helper: build an `InsufficientSignal` error.
    pub fn insufficient_signal(what: impl Into<String>) -> Self {
        Self::InsufficientSignal { what: what.into() }
    }

    /// Helper: build a `Store` error with the store name and message.
    pub fn store(store: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `StoreTimeout` error.
    pub fn store_timeout(store: impl Into<String>, op: impl Into<String>) -> Self {
        Self::StoreTimeout {
            store: store.into(),
            op: op.into(),
        }
    }

    /// Helper: classify any error raised while looking up `key`.
    pub fn lookup_failure(key: impl Into<String>, cause: &Self) -> Self {
        Self::LookupFailure {
            key: key.into(),
            msg: cause.to_string(),
        }
    }

    /// Helper: classify any error raised while saving `key`.
    pub fn save_failure(key: impl Into<String>, cause: &Self) -> Self {
        Self::SaveFailure {
            key: key.into(),
            msg: cause.to_string(),
        }
    }

    /// Returns true if the resolver continues past this error on its own.
    ///
    /// Lookup problems degrade to "not found"; everything else ends the request.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::LookupFailure { .. })
    }
}
