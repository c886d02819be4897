//! Recording adapter for the `LlmClient` port.

use std::sync::{Arc, Mutex, PoisonError};

use crate::cassette::CassetteRecorder;
use crate::ports::{CompletionFuture, CompletionRequest, LlmClient};

/// Records LLM exchanges while delegating to an inner client.
pub struct RecordingLlmClient {
    inner: Box<dyn LlmClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLlmClient {
    /// Wraps `inner`, appending every exchange to `recorder`.
    pub fn new(inner: Box<dyn LlmClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LlmClient for RecordingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.complete(&request).await;
            self.recorder.lock().unwrap_or_else(PoisonError::into_inner).record(&request, &result);
            result
        })
    }
}
