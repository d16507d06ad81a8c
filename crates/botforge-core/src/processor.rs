//! Processor trait for botforge-core
//!
//! A processor is a custom dialogue action: it receives the latest user
//! message together with the intent the NLU pipeline assigned to it and
//! returns the reply plus any conversation-state updates.

use crate::{Request, Response, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Core trait for handling incoming messages
#[async_trait]
pub trait Processor: Send + Sync {
    /// Process a request and generate a response
    async fn process(&self, request: Request) -> Result<Response>;

    /// Optional method to get processor metadata
    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata::default()
    }
}

/// Metadata about a processor
#[derive(Debug, Clone, Default)]
pub struct ProcessorMetadata {
    /// Action name the host dispatches on
    pub name: Option<String>,
    /// Description of what this processor does
    pub description: Option<String>,
}

/// Arc-wrapped processor for thread-safe sharing
pub type SharedProcessor = Arc<dyn Processor>;

#[cfg(test)]
mod tests {
    use super::*;

    /// Simple echo processor for testing
    struct EchoProcessor;

    #[async_trait]
    impl Processor for EchoProcessor {
        async fn process(&self, request: Request) -> Result<Response> {
            Ok(Response::simple(request.id.clone(), request.message))
        }
    }

    #[tokio::test]
    async fn test_shared_processor() {
        let processor: SharedProcessor = Arc::new(EchoProcessor);
        let request = Request::simple("Hello, world!");
        let response = processor.process(request).await.unwrap();
        assert_eq!(response.message, "Hello, world!");
        assert!(processor.metadata().name.is_none());
    }
}
