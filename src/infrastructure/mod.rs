pub mod auth;
pub mod delivery;
pub mod extraction;
pub mod observability;
pub mod persistence;
