mod in_memory_event_log;
mod in_memory_job_repository;
mod in_memory_subscription_store;

pub use in_memory_event_log::{EVENT_HISTORY_LIMIT, InMemoryEventLog};
pub use in_memory_job_repository::InMemoryJobRepository;
pub use in_memory_subscription_store::InMemorySubscriptionStore;
