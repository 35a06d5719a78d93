use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{ExtractionError, InvoiceExtractor};
use crate::domain::InvoiceData;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const EXTRACTION_PROMPT: &str = "Analyze this invoice image and extract the following information in JSON format:
- invoiceNumber: invoice number
- date: date
- vendorName: vendor name
- vendorTaxId: tax ID (RUT/CUIT)
- totalAmount: total amount (number only)
- taxAmount: tax amount (number only, use 0 if not visible)
- netAmount: net amount (number only, calculate as totalAmount - taxAmount if not shown)
- generalConcept: general concept/description
- paymentTerms: payment terms
- lineItems: array of objects with {description, quantity, unitPrice, subtotal}

Return ONLY valid JSON, no markdown, no extra text.";

pub struct GeminiExtractor {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiExtractor {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl InvoiceExtractor for GeminiExtractor {
    async fn extract(&self, image_base64: &str) -> Result<InvoiceData, ExtractionError> {
        if self.api_key.is_empty() {
            return Err(ExtractionError::MissingApiKey);
        }

        // Uploads arrive either bare or as a data URL; the API wants bare.
        let image_data = image_base64
            .rsplit_once(',')
            .map(|(_, b64)| b64)
            .unwrap_or(image_base64);

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/jpeg".to_string(),
                            data: image_data.to_string(),
                        },
                    },
                ],
            }],
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ExtractionError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ExtractionError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::InvalidResponse(e.to_string()))?;

        let text = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| ExtractionError::InvalidResponse("empty response".to_string()))?;

        parse_invoice_response(&text)
    }
}

/// Parses the model's reply into invoice data, tolerating the markdown code
/// fences the model emits despite being told not to.
pub fn parse_invoice_response(text: &str) -> Result<InvoiceData, ExtractionError> {
    let cleaned = text
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    serde_json::from_str(&cleaned).map_err(|e| ExtractionError::InvalidResponse(e.to_string()))
}
