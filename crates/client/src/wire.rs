//! Wire payloads: the JSON shapes the server speaks.
//!
//! Response DTOs deserialize from the opaque body `Value` that crosses the
//! transport port; request payloads are built with `json!`. Conversion into
//! domain types lives here so a malformed body always surfaces as
//! [`Error::MalformedResponse`] with a usable detail string, never as a
//! panic.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use protocol::{
    Element, ElementId, Error, Field, OperationResult, Page, SpaceName, StagedOperation,
    TransactionHandle, TransactionId,
};

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Deserializes a response body, naming `what` in the failure detail.
pub(crate) fn decode<T: DeserializeOwned>(body: Option<Value>, what: &str) -> Result<T, Error> {
    let value = body.ok_or_else(|| Error::MalformedResponse {
        detail: format!("expected a {what} payload, got an empty body"),
    })?;
    serde_json::from_value(value)
        .map_err(|source| Error::MalformedResponse { detail: format!("{what}: {source}") })
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// `{"spaceName": ...}` — returned by space creation and lookup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpaceBody {
    pub space_name: String,
}

impl SpaceBody {
    pub(crate) fn into_name(self) -> Result<SpaceName, Error> {
        SpaceName::new(self.space_name)
            .ok_or_else(|| Error::MalformedResponse { detail: "empty space name".into() })
    }
}

// ---------------------------------------------------------------------------

/// `{"id": ..., "fields": [{"name", "value"}, ...]}` — one stored element.
#[derive(Debug, Deserialize)]
pub(crate) struct ElementBody {
    pub id: String,
    pub fields: Vec<Field>,
}

impl ElementBody {
    pub(crate) fn into_element(self) -> Result<Element, Error> {
        let id = ElementId::new(self.id)
            .ok_or_else(|| Error::MalformedResponse { detail: "empty element id".into() })?;
        Ok(Element::new(id, self.fields))
    }
}

// ---------------------------------------------------------------------------

/// `{"results": [...], "nextPageLink": ...}` — one page of a filtered read.
///
/// `nextPageLink` is opaque and kept verbatim; `null` and absent both mean
/// the terminal page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageBody {
    pub results: Vec<ElementBody>,
    #[serde(default)]
    pub next_page_link: Option<String>,
}

impl PageBody {
    pub(crate) fn into_page(self) -> Result<Page, Error> {
        let elements = self
            .results
            .into_iter()
            .map(ElementBody::into_element)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page { elements, next_link: self.next_page_link })
    }
}

// ---------------------------------------------------------------------------

/// `{"transactionId": ...}` — returned by begin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionBody {
    pub transaction_id: String,
}

impl TransactionBody {
    pub(crate) fn into_handle(self) -> Result<TransactionHandle, Error> {
        let id = TransactionId::new(self.transaction_id)
            .ok_or_else(|| Error::MalformedResponse { detail: "empty transaction id".into() })?;
        Ok(TransactionHandle { id })
    }
}

// ---------------------------------------------------------------------------

/// `{"element": {...} | null}` — outcome of staging one operation.
#[derive(Debug, Deserialize)]
pub(crate) struct StagedResultBody {
    pub element: Option<ElementBody>,
}

impl StagedResultBody {
    pub(crate) fn into_result(self) -> Result<OperationResult, Error> {
        match self.element {
            Some(body) => Ok(OperationResult::of(body.into_element()?)),
            None => Ok(OperationResult::empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of element insertion and replacement: `{"fields": [...]}`.
pub(crate) fn element_fields_body(fields: &[Field]) -> Value {
    json!({ "fields": fields })
}

/// Body of the staging call:
/// `{"type", "bucketName", "elementId", "fields"}`.
pub(crate) fn operation_body(operation: &StagedOperation) -> Value {
    json!({
        "type": operation.kind,
        "bucketName": operation.bucket.as_str(),
        "elementId": operation.element.as_ref().map(ElementId::as_str),
        "fields": operation.fields,
    })
}
