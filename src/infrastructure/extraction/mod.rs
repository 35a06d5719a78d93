mod gemini_extractor;

pub use gemini_extractor::{GeminiExtractor, parse_invoice_response};
