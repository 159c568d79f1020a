//! Response classification.
//!
//! Every response is classified exactly once into a [`ResponseClass`]; the
//! rest of the client consumes the classification through structured
//! matching instead of scattering status and error-code comparisons.
//!
//! The server signals domain conditions through the machine-readable
//! `errorCode` body field. For the abort condition the error code is
//! authoritative over the HTTP status: depending on server version the
//! signal has been observed at both 200 and 409, so the abort check runs at
//! any status and before generic 2xx acceptance.

use crate::transport::Response;

// ---------------------------------------------------------------------------
// Sentinel error codes
// ---------------------------------------------------------------------------

/// Error code accompanying a 404 for a missing space.
pub const SPACE_DOES_NOT_EXIST: &str = "SPACE_DOES_NOT_EXIST";
/// Error code accompanying a 404 for a missing bucket.
pub const BUCKET_DOES_NOT_EXIST: &str = "BUCKET_DOES_NOT_EXIST";
/// Error code accompanying a 404 for a missing element.
pub const ELEMENT_DOES_NOT_EXIST: &str = "ELEMENT_DOES_NOT_EXIST";
/// Error code accompanying a 404 for a missing transaction.
pub const TRANSACTION_DOES_NOT_EXIST: &str = "TRANSACTION_DOES_NOT_EXIST";
/// Error code signalling a server-initiated transaction abort.
pub const TRANSACTION_ABORTED: &str = "TRANSACTION_ABORTED";

// ---------------------------------------------------------------------------

/// Which resource a not-found classification refers to.
///
/// The classifier names the kind; the call site supplies the identifying
/// context (which space, bucket, element, or transaction was addressed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Space,
    Bucket,
    Element,
    Transaction,
}

/// The closed set of domain conditions a response can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// Status in `[200, 300)` with no overriding domain signal.
    Ok,
    /// A 404 whose error code names a missing resource.
    NotFound(NotFoundKind),
    /// The server aborted the transaction due to conflicting concurrent
    /// activity. May arrive at any status, including nominal successes.
    TransactionAborted,
    /// Any other status; the fallback failure.
    UnknownStatus(u16),
}

/// Classifies one response.
///
/// Order matters: not-found sentinels are consulted only on a 404; the abort
/// sentinel is consulted at any status and must precede the generic 2xx
/// acceptance. A 404 whose error code matches no not-found sentinel falls
/// through to the remaining checks.
pub fn classify(response: &Response) -> ResponseClass {
    let code = response.error_code();

    if response.status == 404 {
        match code {
            Some(SPACE_DOES_NOT_EXIST) => return ResponseClass::NotFound(NotFoundKind::Space),
            Some(BUCKET_DOES_NOT_EXIST) => return ResponseClass::NotFound(NotFoundKind::Bucket),
            Some(ELEMENT_DOES_NOT_EXIST) => return ResponseClass::NotFound(NotFoundKind::Element),
            Some(TRANSACTION_DOES_NOT_EXIST) => {
                return ResponseClass::NotFound(NotFoundKind::Transaction)
            }
            _ => {}
        }
    }

    if code == Some(TRANSACTION_ABORTED) {
        return ResponseClass::TransactionAborted;
    }

    if (200..300).contains(&response.status) {
        return ResponseClass::Ok;
    }

    ResponseClass::UnknownStatus(response.status)
}
