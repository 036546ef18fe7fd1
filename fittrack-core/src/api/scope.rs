//! Cancellation of in-flight requests tied to the lifetime of a view.

use std::future::Future;
use std::sync::Mutex;

use futures::future::{AbortHandle, Abortable};

use crate::error::ApiError;

/// Owns the abort handles of the requests started through it.
///
/// Dropping the scope (or calling [`RequestScope::cancel`]) aborts every
/// request still running, and they resolve to [`ApiError::Cancelled`]
/// instead of delivering a stale result.
#[derive(Debug, Default)]
pub struct RequestScope {
    handles: Mutex<Handles>,
}

#[derive(Debug, Default)]
struct Handles {
    next_id: u64,
    pending: Vec<(u64, AbortHandle)>,
}

/// Unregisters a request's handle once it resolves or is dropped.
struct Registration<'a> {
    scope: &'a RequestScope,
    id: u64,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let mut handles = self.scope.lock();
        handles.pending.retain(|(id, _)| *id != self.id);
    }
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `fut` so that it is aborted when this scope is cancelled.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut handles = self.lock();
            let id = handles.next_id;
            handles.next_id += 1;
            handles.pending.push((id, handle));
            id
        };
        let _registered = Registration { scope: self, id };

        match Abortable::new(fut, registration).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!("request aborted by its scope");
                Err(ApiError::Cancelled)
            }
        }
    }

    /// Aborts all requests started through this scope.
    pub fn cancel(&self) {
        let mut handles = self.lock();
        for (_, handle) in handles.pending.drain(..) {
            handle.abort();
        }
    }

    /// Number of requests still in flight.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Handles> {
        self.handles.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cancel();
    }
}
