/// Server services
pub mod auth;

pub use auth::{AuthService, MAX_TOKEN_EXPIRATION_HOURS};
