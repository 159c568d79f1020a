//! Shared value types for the Cubby domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types
//! carry meaningful values with invariants (e.g. a [`FilterQuery`] limit is
//! strictly positive, an [`Element`]'s field list is an ordered sequence)
//! and participate in domain computations.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::identifiers::{BucketName, ElementId, SpaceName, TransactionId};

// ---------------------------------------------------------------------------
// Elements and fields
// ---------------------------------------------------------------------------

/// A single name/value pair within an element.
///
/// Field lists are a *sequence*, not a mapping: duplicate names are permitted
/// and order is preserved for equality and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name. Not required to be unique within an element.
    pub name: String,
    /// Field value. Cubby elements are schemaless; every value is a string.
    pub value: String,
}

impl Field {
    /// Creates a new field.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

// ---------------------------------------------------------------------------

/// A record stored in a bucket: a server-assigned id plus an ordered field list.
///
/// Two elements are equal iff their ids and their exact field sequences are
/// equal (derived equality gives both).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Server-assigned opaque identifier.
    pub id: ElementId,
    /// Ordered field sequence.
    pub fields: Vec<Field>,
}

impl Element {
    /// Creates an element from an id and a field sequence.
    pub fn new(id: ElementId, fields: Vec<Field>) -> Self {
        Self { id, fields }
    }

    /// Appends a field, preserving insertion order. Useful in tests and when
    /// assembling update payloads.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }
}

// ---------------------------------------------------------------------------

/// A space: the top-level namespace containing buckets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Server-assigned space name.
    pub name: SpaceName,
}

// ---------------------------------------------------------------------------
// Filtering and pagination
// ---------------------------------------------------------------------------

/// Parameters for the *first* page of a filtered element read.
///
/// Subsequent pages are fetched via the opaque server-supplied link in
/// [`Page::next_link`]; the client never reconstructs a continuation from
/// `limit`/`offset` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Space to read from.
    pub space: SpaceName,
    /// Bucket to read from.
    pub bucket: BucketName,
    /// Maximum number of elements per page. Strictly positive.
    pub limit: u32,
    /// Number of elements to skip before the first page.
    pub offset: u32,
    /// Optional query-language expression, passed to the server verbatim.
    pub query: Option<String>,
}

impl FilterQuery {
    /// Creates a query, returning `None` if `limit` is zero.
    #[must_use]
    pub fn new(space: SpaceName, bucket: BucketName, limit: u32, offset: u32) -> Option<Self> {
        if limit == 0 {
            return None;
        }
        Some(Self { space, bucket, limit, offset, query: None })
    }

    /// Attaches a query-language expression.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

// ---------------------------------------------------------------------------

/// One page of a filtered read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Elements in server-given order.
    pub elements: Vec<Element>,
    /// Opaque continuation link. `None` means there are no further pages;
    /// this is the sole termination condition for a pagination loop.
    pub next_link: Option<String>,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// A lightweight handle to a server-side transaction.
///
/// Holds only the server-assigned id, no network or lock resources. Dropping
/// the handle has no effect on server state: the server is the sole authority
/// on transaction existence and finality, and an abandoned transaction stays
/// open server-side until it independently times out or is committed/aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle {
    /// Server-assigned transaction identifier.
    pub id: TransactionId,
}

// ---------------------------------------------------------------------------

/// The kind of an operation staged within a transaction.
///
/// This is the closed set the server recognizes. Untyped kind strings enter
/// the domain only through [`FromStr`], which rejects anything outside the
/// set before a [`StagedOperation`] (and therefore any network call) can
/// exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    /// Insert a new element into a bucket.
    Create,
    /// Replace an existing element's fields.
    Update,
    /// Remove an element.
    Delete,
    /// Read an element as of the transaction's view.
    Read,
}

impl OperationKind {
    /// Returns the wire name of the kind (`"CREATE"`, `"UPDATE"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Create => "CREATE",
            OperationKind::Update => "UPDATE",
            OperationKind::Delete => "DELETE",
            OperationKind::Read => "READ",
        }
    }
}

impl FromStr for OperationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(OperationKind::Create),
            "UPDATE" => Ok(OperationKind::Update),
            "DELETE" => Ok(OperationKind::Delete),
            "READ" => Ok(OperationKind::Read),
            other => Err(Error::UnknownOperationKind { kind: other.to_string() }),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// One operation to be staged within an open transaction.
///
/// Constructed by the caller before staging. `element` is absent for
/// [`OperationKind::Create`] (the server assigns the id) and present for the
/// other kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedOperation {
    /// What the operation does.
    pub kind: OperationKind,
    /// Bucket the operation targets.
    pub bucket: BucketName,
    /// Element the operation targets, when addressing an existing element.
    pub element: Option<ElementId>,
    /// Field payload for `CREATE`/`UPDATE`; empty for `DELETE`/`READ`.
    pub fields: Vec<Field>,
}

impl StagedOperation {
    /// Stages an element insertion.
    pub fn create(bucket: BucketName, fields: Vec<Field>) -> Self {
        Self { kind: OperationKind::Create, bucket, element: None, fields }
    }

    /// Stages a replacement of an existing element's fields.
    pub fn update(bucket: BucketName, element: ElementId, fields: Vec<Field>) -> Self {
        Self { kind: OperationKind::Update, bucket, element: Some(element), fields }
    }

    /// Stages an element removal.
    pub fn delete(bucket: BucketName, element: ElementId) -> Self {
        Self { kind: OperationKind::Delete, bucket, element: Some(element), fields: Vec::new() }
    }

    /// Stages a read of an element as of the transaction's view.
    pub fn read(bucket: BucketName, element: ElementId) -> Self {
        Self { kind: OperationKind::Read, bucket, element: Some(element), fields: Vec::new() }
    }
}

// ---------------------------------------------------------------------------

/// The result of staging one operation.
///
/// Carries an element for kinds that return data (`READ`, and `CREATE` when
/// the server echoes the stored element); empty for pure mutations. Empty is
/// an observable success state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult(Option<Element>);

impl OperationResult {
    /// Wraps an element returned by the server.
    pub fn of(element: Element) -> Self {
        Self(Some(element))
    }

    /// The empty result: the staged operation produced no payload.
    pub fn empty() -> Self {
        Self(None)
    }

    /// Returns `true` if the staged operation produced no payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the contained element, if any.
    pub fn element(&self) -> Option<&Element> {
        self.0.as_ref()
    }

    /// Consumes the result, yielding the contained element, if any.
    pub fn into_element(self) -> Option<Element> {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default backoff between staging retries after a transaction abort.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(300);

/// Default number of staging retries after a transaction abort.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Client construction parameters.
///
/// Retry policy is explicit per-client state so that concurrent clients with
/// different policies can coexist; there is no global configuration. The
/// retry fields apply only to the staging call of the transaction protocol,
/// never to begin, commit, or any non-transactional operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the Cubby server, e.g. `http://localhost:9000`. The
    /// `/api/v1` prefix is appended by the client.
    pub base_url: String,
    /// Sleep between staging retries when the server reports an abort.
    pub retry_backoff: Duration,
    /// Maximum number of staging retries after the initial attempt.
    pub max_retries: u32,
}

impl ClientConfig {
    /// Creates a configuration with the default retry policy.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Overrides the backoff between staging retries.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Overrides the staging retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_equality_is_order_sensitive() {
        let id = ElementId::new("e1").unwrap();
        let a = Element::new(id.clone(), vec![Field::new("a", "1"), Field::new("b", "2")]);
        let b = Element::new(id.clone(), vec![Field::new("b", "2"), Field::new("a", "1")]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn element_permits_duplicate_field_names() {
        let id = ElementId::new("e1").unwrap();
        let e = Element::new(id, Vec::new()).with_field("tag", "x").with_field("tag", "y");
        assert_eq!(e.fields.len(), 2);
        assert_eq!(e.fields[0].value, "x");
        assert_eq!(e.fields[1].value, "y");
    }

    #[test]
    fn filter_query_rejects_zero_limit() {
        let space = SpaceName::new("s").unwrap();
        let bucket = BucketName::new("b").unwrap();
        assert!(FilterQuery::new(space.clone(), bucket.clone(), 0, 0).is_none());
        assert!(FilterQuery::new(space, bucket, 1, 0).is_some());
    }

    #[test]
    fn operation_kind_parses_only_the_recognized_set() {
        assert_eq!("CREATE".parse::<OperationKind>().unwrap(), OperationKind::Create);
        assert_eq!("READ".parse::<OperationKind>().unwrap(), OperationKind::Read);

        let err = "UNKNOWN".parse::<OperationKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownOperationKind { kind } if kind == "UNKNOWN"));
        // Wire names are case-sensitive.
        assert!("create".parse::<OperationKind>().is_err());
    }

    #[test]
    fn operation_kind_serializes_to_wire_names() {
        assert_eq!(serde_json::to_value(OperationKind::Update).unwrap(), serde_json::json!("UPDATE"));
        assert_eq!(OperationKind::Delete.as_str(), "DELETE");
    }

    #[test]
    fn operation_result_empty_is_observable() {
        assert!(OperationResult::empty().is_empty());

        let e = Element::new(ElementId::new("e1").unwrap(), Vec::new());
        let r = OperationResult::of(e.clone());
        assert!(!r.is_empty());
        assert_eq!(r.into_element(), Some(e));
    }

    #[test]
    fn config_defaults_and_overrides() {
        let config = ClientConfig::new("http://localhost:9000");
        assert_eq!(config.retry_backoff, DEFAULT_RETRY_BACKOFF);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);

        let config = config.with_retry_backoff(Duration::from_millis(5)).with_max_retries(0);
        assert_eq!(config.retry_backoff, Duration::from_millis(5));
        assert_eq!(config.max_retries, 0);
    }
}
