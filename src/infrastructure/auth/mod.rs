mod token_service;

pub use token_service::{AuthError, Claims, TokenService};
