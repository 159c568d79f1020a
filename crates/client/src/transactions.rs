//! The optimistic transaction protocol: begin → stage(×N) → commit.
//!
//! The server is the sole arbiter of transaction state. It may abort a
//! transaction at any point because of conflicting concurrent transactions,
//! and it signals this through the abort error code, possibly on a
//! nominally successful HTTP status. Staging (and only staging) reissues
//! the identical request a bounded number of times with backoff when it
//! sees that signal; begin and commit never retry.
//!
//! For a single transaction the engine is strictly sequential: each staging
//! call is awaited before the next is issued, matching the server's
//! sequential transaction log. Retry sleeps block only the issuing task, so
//! other transactions sharing the client are unaffected.

use protocol::{
    classify, Error, Method, OperationResult, Request, Response, ResponseClass, SpaceName,
    StagedOperation, TransactionHandle, TransactionId,
};

use crate::client::{interpret, Client, Scope};
use crate::wire;

impl Client {
    /// Begins a transaction in `space`.
    pub async fn begin_transaction(&self, space: &SpaceName) -> Result<TransactionHandle, Error> {
        let request =
            Request::new(Method::Post, self.endpoint(&["transactions", space.as_str()]));
        let body = self.dispatch(request, Scope::none().in_space(space)).await?;
        wire::decode::<wire::TransactionBody>(body, "transaction")?.into_handle()
    }

    /// Stages one operation within an open transaction.
    ///
    /// Runs under the retry-on-abort policy: while the response classifies
    /// as aborted and the retry budget is not exhausted, the identical
    /// request is reissued after [`ClientConfig::retry_backoff`]. An abort
    /// that survives the budget is surfaced as
    /// [`Error::TransactionAborted`], never swallowed. Not-found outcomes
    /// are permanent addressing errors and fail immediately, without retry.
    ///
    /// [`ClientConfig::retry_backoff`]: protocol::ClientConfig::retry_backoff
    pub async fn stage_operation(
        &self,
        transaction: &TransactionId,
        operation: &StagedOperation,
    ) -> Result<OperationResult, Error> {
        let request = Request::new(
            Method::Post,
            self.endpoint(&["transactions", transaction.as_str(), "add-operation"]),
        )
        .with_body(wire::operation_body(operation));

        let response = self.stage_with_abort_retry(transaction, request).await?;

        let mut scope = Scope::none().in_transaction(transaction).in_bucket(&operation.bucket);
        if let Some(element) = &operation.element {
            scope = scope.at_element(element);
        }
        let body = interpret(response, scope)?;
        wire::decode::<wire::StagedResultBody>(body, "staged operation result")?.into_result()
    }

    /// Commits a transaction. Success is silent; the transaction id is
    /// invalid afterwards. A conflict surfaces as
    /// [`Error::TransactionAborted`] after exactly one call; commit is
    /// never retried.
    pub async fn commit_transaction(&self, transaction: &TransactionId) -> Result<(), Error> {
        let request = Request::new(
            Method::Post,
            self.endpoint(&["transactions", transaction.as_str(), "commit"]),
        );
        self.dispatch(request, Scope::none().in_transaction(transaction)).await?;
        Ok(())
    }

    /// Issues a staging request, reissuing it while the server reports an
    /// abort and the retry budget allows. Returns the last response, still
    /// unclassified from the caller's point of view: exhaustion leaves the
    /// final aborted response to be interpreted (and surfaced) normally.
    async fn stage_with_abort_retry(
        &self,
        transaction: &TransactionId,
        request: Request,
    ) -> Result<Response, Error> {
        let mut attempt: u32 = 0;
        loop {
            let response = self.send(request.clone()).await?;
            if classify(&response) == ResponseClass::TransactionAborted
                && attempt < self.max_retries
            {
                attempt += 1;
                tracing::warn!(
                    transaction = %transaction,
                    attempt,
                    max_retries = self.max_retries,
                    "staging saw a transaction abort; backing off before reissuing"
                );
                tokio::time::sleep(self.retry_backoff).await;
                continue;
            }
            return Ok(response);
        }
    }
}
