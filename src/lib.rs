//! Invoice extraction relay: accepts uploaded invoice images, forwards them
//! to a vision model, and tracks the work as asynchronous jobs with webhook
//! notifications on completion.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
