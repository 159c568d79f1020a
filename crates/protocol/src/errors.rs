//! Error taxonomy for the Cubby client.
//!
//! [`Error`] covers every failure a public client operation can surface.
//! [`TransportError`] covers connection-level failure below the port
//! boundary; it is wrapped into [`Error::Transport`] by the facade.
//!
//! None of these conditions is recovered from locally: the only retried
//! condition is [`Error::TransactionAborted`] during staging, that retry is
//! bounded, and exhaustion still surfaces the error to the caller.

use thiserror::Error;

use crate::identifiers::{BucketName, ElementId, SpaceName, TransactionId};

// ---------------------------------------------------------------------------
// Client-level errors
// ---------------------------------------------------------------------------

/// Errors surfaced by public client operations.
///
/// Every variant carries the identifiers needed to pinpoint the failing
/// resource. The not-found variants indicate a permanent addressing error
/// and are never retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The addressed space does not exist.
    ///
    /// Produced by: any operation addressing a space, when the server
    /// responds 404 with the space-not-found error code.
    #[error("space '{space}' does not exist")]
    SpaceNotFound {
        /// The space that was addressed.
        space: SpaceName,
    },

    /// The addressed bucket does not exist.
    ///
    /// `space` is absent when the bucket was addressed through a transaction
    /// (staging identifies buckets by name only; the space is implied by the
    /// transaction).
    #[error("bucket '{bucket}' does not exist")]
    BucketNotFound {
        /// The enclosing space, when the call site addressed one directly.
        space: Option<SpaceName>,
        /// The bucket that was addressed.
        bucket: BucketName,
        /// The enclosing transaction, for staging call sites.
        transaction: Option<TransactionId>,
    },

    /// The addressed element does not exist.
    #[error("element '{element}' does not exist in bucket '{bucket}'")]
    ElementNotFound {
        /// The enclosing space, when the call site addressed one directly.
        space: Option<SpaceName>,
        /// The bucket that was searched.
        bucket: BucketName,
        /// The element that was addressed.
        element: ElementId,
        /// The enclosing transaction, for staging call sites.
        transaction: Option<TransactionId>,
    },

    /// The addressed transaction does not exist (never begun, already
    /// committed, or already reaped by the server).
    #[error("transaction '{transaction}' does not exist")]
    TransactionNotFound {
        /// The transaction that was addressed.
        transaction: TransactionId,
    },

    /// The server unilaterally aborted the transaction due to conflicting
    /// concurrent transactions.
    ///
    /// Produced by: staging (after the retry budget is exhausted) and commit
    /// (immediately; commit is never retried). The signal arrives as a
    /// domain error code, not necessarily as an HTTP error status.
    #[error("transaction '{transaction}' was aborted by the server")]
    TransactionAborted {
        /// The aborted transaction.
        transaction: TransactionId,
    },

    /// A kind string outside the recognized operation set.
    ///
    /// Produced by: parsing untyped input into
    /// [`crate::types::OperationKind`]. Purely client-side; no network call
    /// is ever made for this condition.
    #[error("unknown operation kind '{kind}'")]
    UnknownOperationKind {
        /// The rejected kind string.
        kind: String,
    },

    /// A response status outside `[200, 300)` that matched no more specific
    /// classification. This is the fallback failure.
    #[error("unexpected status code {status}")]
    UnexpectedStatus {
        /// The raw HTTP status code.
        status: u16,
    },

    /// A nominally successful response whose body is missing or does not
    /// have the documented shape.
    #[error("malformed response body: {detail}")]
    MalformedResponse {
        /// What was expected and what was found.
        detail: String,
    },

    /// The client configuration is invalid (e.g. an unparseable base URL).
    ///
    /// Produced at construction; a client is never built from an invalid
    /// configuration.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The transport failed below the protocol layer.
    ///
    /// Transient-network retry is deliberately out of scope; this surfaces
    /// unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// ---------------------------------------------------------------------------
// Transport-level errors
// ---------------------------------------------------------------------------

/// Failure below the transport port: the request never produced a usable
/// `(status, body)` pair.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("request to {url} failed: {message}")]
    Request {
        /// The request URL.
        url: String,
        /// Underlying failure description.
        message: String,
    },

    /// The response carried a body that is not valid JSON.
    #[error("response from {url} is not valid JSON: {message}")]
    InvalidBody {
        /// The request URL.
        url: String,
        /// Underlying parse failure description.
        message: String,
    },
}
