//! The client facade and the shared request → classify → parse machinery.
//!
//! Every public operation is one such unit: build the request URL, send it
//! through the transport port, classify the response once, map the
//! classification through the call site's [`Scope`] into a typed error, and
//! parse the body on the success path. The per-operation differences
//! (path, not-found context, payload shape) are parameters, not copies of
//! the pipeline.

use std::sync::Arc;

use serde_json::Value;
use url::Url;

use protocol::{
    classify, BucketName, ClientConfig, Element, ElementId, Error, Field, Method, NotFoundKind,
    Request, Response, ResponseClass, Space, SpaceName, TransactionId, Transport,
};
use transport::HttpTransport;

use crate::wire;

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

/// Asynchronous Cubby client.
///
/// Stateless aside from the server base URL and the retry configuration; it
/// holds no per-transaction registry and no locks, so a single instance may
/// be shared across concurrently-issued independent transactions. The one
/// transport handle is owned here and shared behind an `Arc`.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base: Url,
    pub(crate) retry_backoff: std::time::Duration,
    pub(crate) max_retries: u32,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base.as_str())
            .field("retry_backoff", &self.retry_backoff)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client over the default reqwest-backed transport.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Creates a client over an injected transport implementation.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, Error> {
        let mut base = Url::parse(&config.base_url).map_err(|source| Error::Configuration {
            message: format!("invalid base URL '{}': {source}", config.base_url),
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Configuration {
                message: format!("base URL '{}' cannot carry a path", config.base_url),
            });
        }
        if let Ok(mut path) = base.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]);
        }
        Ok(Self {
            transport,
            base,
            retry_backoff: config.retry_backoff,
            max_retries: config.max_retries,
        })
    }

    /// Builds an endpoint URL under the versioned API root. Segments are
    /// percent-encoded by the URL type, never concatenated by hand.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Cannot fail: with_transport rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn send(&self, request: Request) -> Result<Response, Error> {
        Ok(self.transport.send(request).await?)
    }

    /// One request → classify → map unit. Returns the body for the caller
    /// to parse; the classification itself is consumed here.
    pub(crate) async fn dispatch(&self, request: Request, scope: Scope) -> Result<Option<Value>, Error> {
        let response = self.send(request).await?;
        interpret(response, scope)
    }

    // -----------------------------------------------------------------------
    // Spaces
    // -----------------------------------------------------------------------

    /// Creates a space. The server assigns and returns its name.
    pub async fn create_space(&self) -> Result<SpaceName, Error> {
        let request = Request::new(Method::Post, self.endpoint(&["spaces"]));
        let body = self.dispatch(request, Scope::none()).await?;
        wire::decode::<wire::SpaceBody>(body, "space")?.into_name()
    }

    /// Deletes a space and everything in it.
    pub async fn delete_space(&self, space: &SpaceName) -> Result<(), Error> {
        let request = Request::new(Method::Delete, self.endpoint(&["spaces", space.as_str()]));
        self.dispatch(request, Scope::none().in_space(space)).await?;
        Ok(())
    }

    /// Looks a space up, confirming its existence.
    pub async fn get_space(&self, space: &SpaceName) -> Result<Space, Error> {
        let request = Request::new(Method::Get, self.endpoint(&["spaces", space.as_str()]));
        let body = self.dispatch(request, Scope::none().in_space(space)).await?;
        let name = wire::decode::<wire::SpaceBody>(body, "space")?.into_name()?;
        Ok(Space { name })
    }

    // -----------------------------------------------------------------------
    // Buckets
    // -----------------------------------------------------------------------

    /// Deletes a bucket and its elements. Buckets have no create call: the
    /// server materializes one on first element insertion.
    pub async fn delete_bucket(&self, space: &SpaceName, bucket: &BucketName) -> Result<(), Error> {
        let request =
            Request::new(Method::Delete, self.endpoint(&[space.as_str(), bucket.as_str()]));
        self.dispatch(request, Scope::none().in_space(space).in_bucket(bucket)).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Elements
    // -----------------------------------------------------------------------

    /// Adds an element; the server assigns its id and echoes the stored
    /// element back.
    pub async fn add_element(
        &self,
        space: &SpaceName,
        bucket: &BucketName,
        fields: Vec<Field>,
    ) -> Result<Element, Error> {
        let request = Request::new(Method::Post, self.endpoint(&[space.as_str(), bucket.as_str()]))
            .with_body(wire::element_fields_body(&fields));
        let body =
            self.dispatch(request, Scope::none().in_space(space).in_bucket(bucket)).await?;
        wire::decode::<wire::ElementBody>(body, "element")?.into_element()
    }

    /// Deletes an element.
    pub async fn delete_element(
        &self,
        space: &SpaceName,
        bucket: &BucketName,
        element: &ElementId,
    ) -> Result<(), Error> {
        let request = Request::new(
            Method::Delete,
            self.endpoint(&[space.as_str(), bucket.as_str(), element.as_str()]),
        );
        let scope = Scope::none().in_space(space).in_bucket(bucket).at_element(element);
        self.dispatch(request, scope).await?;
        Ok(())
    }

    /// Replaces an element's fields.
    pub async fn update_element(
        &self,
        space: &SpaceName,
        bucket: &BucketName,
        element: &ElementId,
        fields: Vec<Field>,
    ) -> Result<(), Error> {
        let request = Request::new(
            Method::Put,
            self.endpoint(&[space.as_str(), bucket.as_str(), element.as_str()]),
        )
        .with_body(wire::element_fields_body(&fields));
        let scope = Scope::none().in_space(space).in_bucket(bucket).at_element(element);
        self.dispatch(request, scope).await?;
        Ok(())
    }

    /// Reads an element.
    pub async fn get_element(
        &self,
        space: &SpaceName,
        bucket: &BucketName,
        element: &ElementId,
    ) -> Result<Element, Error> {
        let request = Request::new(
            Method::Get,
            self.endpoint(&[space.as_str(), bucket.as_str(), element.as_str()]),
        );
        let scope = Scope::none().in_space(space).in_bucket(bucket).at_element(element);
        let body = self.dispatch(request, scope).await?;
        wire::decode::<wire::ElementBody>(body, "element")?.into_element()
    }
}

// ---------------------------------------------------------------------------
// Classification context
// ---------------------------------------------------------------------------

/// The identifiers a call site can attach to a classification.
///
/// The classifier names *what kind* of resource is missing; the scope knows
/// *which* resource the call addressed, so the typed error carries exactly
/// the identifying context the call site has.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scope {
    space: Option<SpaceName>,
    bucket: Option<BucketName>,
    element: Option<ElementId>,
    transaction: Option<TransactionId>,
}

impl Scope {
    pub(crate) fn none() -> Self {
        Self::default()
    }

    pub(crate) fn in_space(mut self, space: &SpaceName) -> Self {
        self.space = Some(space.clone());
        self
    }

    pub(crate) fn in_bucket(mut self, bucket: &BucketName) -> Self {
        self.bucket = Some(bucket.clone());
        self
    }

    pub(crate) fn at_element(mut self, element: &ElementId) -> Self {
        self.element = Some(element.clone());
        self
    }

    pub(crate) fn in_transaction(mut self, transaction: &TransactionId) -> Self {
        self.transaction = Some(transaction.clone());
        self
    }

    /// Maps a not-found classification into the typed error for this scope.
    /// A kind the scope has no identifiers for names a resource this call
    /// never addressed; that is a contract violation, reported through the
    /// raw status instead of a fabricated identifier.
    fn not_found(self, kind: NotFoundKind, status: u16) -> Error {
        match kind {
            NotFoundKind::Space => match self.space {
                Some(space) => Error::SpaceNotFound { space },
                None => Error::UnexpectedStatus { status },
            },
            NotFoundKind::Bucket => match self.bucket {
                Some(bucket) => Error::BucketNotFound {
                    space: self.space,
                    bucket,
                    transaction: self.transaction,
                },
                None => Error::UnexpectedStatus { status },
            },
            NotFoundKind::Element => match (self.bucket, self.element) {
                (Some(bucket), Some(element)) => Error::ElementNotFound {
                    space: self.space,
                    bucket,
                    element,
                    transaction: self.transaction,
                },
                _ => Error::UnexpectedStatus { status },
            },
            NotFoundKind::Transaction => match self.transaction {
                Some(transaction) => Error::TransactionNotFound { transaction },
                None => Error::UnexpectedStatus { status },
            },
        }
    }

    fn aborted(self, status: u16) -> Error {
        match self.transaction {
            Some(transaction) => Error::TransactionAborted { transaction },
            None => Error::UnexpectedStatus { status },
        }
    }
}

/// Consumes one classified response: success yields the body for parsing,
/// everything else becomes the scope's typed error.
pub(crate) fn interpret(response: Response, scope: Scope) -> Result<Option<Value>, Error> {
    match classify(&response) {
        ResponseClass::Ok => Ok(response.body),
        ResponseClass::NotFound(kind) => Err(scope.not_found(kind, response.status)),
        ResponseClass::TransactionAborted => Err(scope.aborted(response.status)),
        ResponseClass::UnknownStatus(status) => Err(Error::UnexpectedStatus { status }),
    }
}
