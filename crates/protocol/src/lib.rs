//! Core domain for the Cubby client.
//!
//! This crate contains every domain concept, newtype identifier, shared value
//! type, the response classifier, and the transport port trait used by the
//! rest of the workspace. Infrastructure crates implement the traits defined
//! here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies. It
//! defines *what* the client needs from the network; the `transport` crate
//! defines *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype domain identifiers (`SpaceName`, `ElementId`, etc.) |
//! | [`types`] | Shared value types (`Element`, `FilterQuery`, `StagedOperation`, etc.) |
//! | [`errors`] | Error taxonomy ([`Error`], [`TransportError`]) |
//! | [`classify`] | Response classification ([`ResponseClass`], sentinel error codes) |
//! | [`transport`] | Transport port ([`Transport`], [`Request`], [`Response`]) |

pub mod classify;
pub mod errors;
pub mod identifiers;
pub mod transport;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use classify::{classify, NotFoundKind, ResponseClass};
pub use errors::{Error, TransportError};
pub use identifiers::{BucketName, ElementId, SpaceName, TransactionId};
pub use transport::{Method, Request, Response, Transport};
pub use types::{
    ClientConfig, Element, Field, FilterQuery, OperationKind, OperationResult, Page, Space,
    StagedOperation, TransactionHandle,
};
