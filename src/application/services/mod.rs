mod extraction_worker;
mod notification_service;

pub use extraction_worker::{ExtractionMessage, ExtractionWorker};
pub use notification_service::{EVENT_INVOICE_EXTRACTED, EVENT_JOB_COMPLETED, NotificationService};
