//! Cursor-driven pagination over filtered element reads.
//!
//! Only the first page is built from caller-supplied parameters. Every
//! subsequent page is fetched through the opaque `nextPageLink` the server
//! returned; the client never reconstructs a continuation from
//! `limit`/`offset` itself. The walker holds no cursor state between calls;
//! callers thread [`Page::next_link`] through a loop until it is absent,
//! which is the sole termination condition.

use protocol::{Error, FilterQuery, Method, Page, Request};

use crate::client::{Client, Scope};
use crate::wire;

impl Client {
    /// Fetches the first page matching `query`.
    pub async fn filter_elements(&self, query: &FilterQuery) -> Result<Page, Error> {
        let mut url = self.endpoint(&[query.space.as_str(), query.bucket.as_str()]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.limit.to_string());
            pairs.append_pair("offset", &query.offset.to_string());
            if let Some(expression) = &query.query {
                pairs.append_pair("query", expression);
            }
        }

        let request = Request::new(Method::Get, url);
        let scope = Scope::none().in_space(&query.space).in_bucket(&query.bucket);
        let body = self.dispatch(request, scope).await?;
        wire::decode::<wire::PageBody>(body, "page")?.into_page()
    }

    /// Fetches the page behind a server-supplied continuation link.
    ///
    /// The link is issued exactly as given: it already encodes a validated
    /// resource path, so existence is not re-checked. This is a pure read;
    /// repeating the same link is idempotent.
    pub async fn filter_next(&self, link: &str) -> Result<Page, Error> {
        let request = Request::new(Method::Get, link);
        let body = self.dispatch(request, Scope::none()).await?;
        wire::decode::<wire::PageBody>(body, "page")?.into_page()
    }
}
