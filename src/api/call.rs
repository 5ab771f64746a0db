//! Loading/error bookkeeping around a single backend call.

use super::error::ApiResult;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives the status changes of a call wrapped by [`execute`].
pub trait CallStatusSink {
    /// Call started: loading on, previous error cleared.
    fn begin(&mut self);

    fn fail(&mut self, message: String);

    fn finish(&mut self);
}

/// Runs `call`, reporting progress to `sink`.
///
/// The error is recorded and still returned, so the caller decides whether
/// to surface it further. Overlapping calls on one sink are not coordinated;
/// whichever finishes last leaves its status behind.
pub async fn execute<S, T, F>(mut sink: S, call: F) -> ApiResult<T>
where
    S: CallStatusSink,
    F: Future<Output = ApiResult<T>>,
{
    sink.begin();
    let result = call.await;
    if let Err(err) = &result {
        tracing::warn!(error = %err, "backend call failed");
        sink.fail(err.to_string());
    }
    sink.finish();
    result
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Shareable sink for code that runs outside the UI.
#[derive(Clone, Default)]
pub struct CallTracker {
    status: Arc<Mutex<CallStatus>>,
}

impl CallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> CallStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn execute<T, F>(&self, call: F) -> ApiResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        execute(self.clone(), call).await
    }

    fn update(&self, apply: impl FnOnce(&mut CallStatus)) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut status);
    }
}

impl CallStatusSink for CallTracker {
    fn begin(&mut self) {
        self.update(|status| {
            status.loading = true;
            status.error = None;
        });
    }

    fn fail(&mut self, message: String) {
        self.update(|status| status.error = Some(message));
    }

    fn finish(&mut self) {
        self.update(|status| status.loading = false);
    }
}
