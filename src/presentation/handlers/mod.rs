mod extract_invoice;
mod health;
mod job_status;
mod login;
mod queue_invoice;
mod webhooks;

pub use extract_invoice::extract_invoice_handler;
pub use health::health_handler;
pub use job_status::job_status_handler;
pub use login::login_handler;
pub use queue_invoice::queue_invoice_handler;
pub use webhooks::{inbound_webhook_handler, subscribe_webhook_handler, webhook_events_handler};
