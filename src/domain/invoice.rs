use serde::{Deserialize, Serialize};

/// Structured invoice data as returned by the extraction model.
///
/// Every field is defaulted so a partially filled model response still
/// deserializes; numeric fields fall back to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub vendor_tax_id: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub tax_amount: f64,
    #[serde(default)]
    pub net_amount: f64,
    #[serde(default)]
    pub general_concept: String,
    #[serde(default)]
    pub payment_terms: String,
    #[serde(default)]
    pub line_items: Vec<InvoiceLineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub subtotal: f64,
}
