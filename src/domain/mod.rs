mod invoice;
mod job;
mod job_status;
mod webhook_event;

pub use invoice::{InvoiceData, InvoiceLineItem};
pub use job::{Job, JobId};
pub use job_status::JobStatus;
pub use webhook_event::WebhookEvent;
