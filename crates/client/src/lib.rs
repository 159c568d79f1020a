//! Async Rust client for the Cubby data store.
//!
//! Cubby organizes data as *spaces* containing *buckets* of schemaless
//! *elements* (ordered field lists), exposed over HTTP/JSON. This crate
//! provides the [`Client`] facade: space/bucket/element operations,
//! cursor-driven pagination, and the optimistic transaction protocol with
//! bounded retry when the server aborts a transaction under concurrent
//! conflict.
//!
//! ## Architectural Layer
//!
//! **Orchestration.** Each operation is one request → classify → parse unit
//! built on the `protocol` domain crate; HTTP itself lives behind the
//! [`protocol::Transport`] port (reqwest-backed by default, anything in
//! tests).
//!
//! # Example
//!
//! ```rust,no_run
//! use client::{BucketName, Client, ClientConfig, Field, StagedOperation};
//!
//! # async fn example() -> Result<(), client::Error> {
//! let cubby = Client::new(ClientConfig::new("http://localhost:9000"))?;
//!
//! // Plain CRUD.
//! let space = cubby.create_space().await?;
//! let users = BucketName::new("users").unwrap();
//! let element = cubby
//!     .add_element(&space, &users, vec![Field::new("firstName", "John")])
//!     .await?;
//!
//! // A transaction: begin, stage, commit. Staging retries automatically
//! // (bounded, with backoff) when the server reports an abort.
//! let txn = cubby.begin_transaction(&space).await?;
//! cubby
//!     .stage_operation(&txn.id, &StagedOperation::read(users.clone(), element.id.clone()))
//!     .await?;
//! cubby.commit_transaction(&txn.id).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod filter;
mod transactions;
mod wire;

pub use crate::client::Client;

// Re-export the domain surface so callers depend on one crate.
pub use protocol::{
    classify, BucketName, ClientConfig, Element, ElementId, Error, Field, FilterQuery, Method,
    NotFoundKind, OperationKind, OperationResult, Page, Request, Response, ResponseClass, Space,
    SpaceName, StagedOperation, TransactionHandle, TransactionId, Transport, TransportError,
};
