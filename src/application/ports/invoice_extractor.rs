use async_trait::async_trait;

use crate::domain::InvoiceData;

/// External capability that turns a base64-encoded invoice image into
/// structured invoice data.
#[async_trait]
pub trait InvoiceExtractor: Send + Sync {
    async fn extract(&self, image_base64: &str) -> Result<InvoiceData, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("api key not configured")]
    MissingApiKey,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
