//! LlmClient trait definition

use async_trait::async_trait;
#[allow(unused_imports)]
use tracing::debug;

use super::{GenerationRequest, GenerationResponse, LlmError};

/// Stateless generation client - one request, one reply
///
/// This is the seam between the pipeline and the hosted model. Each call is
/// independent: no conversation state, no retry, no backoff, and no request
/// timeout. Single-flight is enforced by the caller's busy flag, not here.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one generation request and wait for the raw reply text
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::debug;

    /// Mock LLM client for unit tests
    ///
    /// Returns queued replies in order and errors when exhausted.
    pub struct MockLlmClient {
        replies: Vec<String>,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(replies: Vec<String>) -> Self {
            debug!(reply_count = %replies.len(), "MockLlmClient::new: called");
            Self {
                replies,
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn generate(&self, _request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
            debug!(%idx, "MockLlmClient::generate: called");
            self.replies
                .get(idx)
                .cloned()
                .map(|text| GenerationResponse { text })
                .ok_or_else(|| LlmError::InvalidResponse("No more mock replies".to_string()))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_replies_in_order() {
            let client = MockLlmClient::new(vec!["one".to_string(), "two".to_string()]);

            let request = GenerationRequest::text_only("prompt", 100);
            assert_eq!(client.generate(request.clone()).await.unwrap().text, "one");
            assert_eq!(client.generate(request).await.unwrap().text, "two");
            assert_eq!(client.call_count(), 2);
        }

        #[tokio::test]
        async fn test_mock_client_errors_when_exhausted() {
            let client = MockLlmClient::new(vec![]);
            let request = GenerationRequest::text_only("prompt", 100);
            assert!(client.generate(request).await.is_err());
        }
    }
}
