// src/agents/mod.rs — Concrete steps: researcher, supervisor, writer

pub mod decode;
pub mod researcher;
pub mod supervisor;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing {
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::infra::errors::DistillError;
    use crate::provider::{ChatRequest, ChatResponse, ModelProvider, TokenUsage};

    /// Provider returning queued canned replies, no network involved.
    pub struct CannedProvider {
        replies: Mutex<Vec<Result<String, String>>>,
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl CannedProvider {
        pub fn new(replies: Vec<Result<String, String>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_reply(reply: &str) -> Self {
            Self::new(vec![Ok(reply.to_string())])
        }

        pub fn failing(message: &str) -> Self {
            Self::new(vec![Err(message.to_string())])
        }
    }

    #[async_trait]
    impl ModelProvider for CannedProvider {
        fn id(&self) -> &str {
            "canned"
        }

        fn name(&self) -> &str {
            "Canned Provider"
        }

        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, DistillError> {
            self.requests.lock().unwrap().push(request);
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(DistillError::Provider {
                    provider: "canned".into(),
                    message: "no canned reply left".into(),
                });
            }
            match replies.remove(0) {
                Ok(content) => Ok(ChatResponse {
                    content,
                    usage: TokenUsage {
                        input_tokens: 100,
                        output_tokens: 50,
                    },
                }),
                Err(message) => Err(DistillError::Provider {
                    provider: "canned".into(),
                    message,
                }),
            }
        }
    }
}
