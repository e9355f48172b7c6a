//! Authentication: credential bundle, token claims, and the session manager.

pub mod claims;
pub mod credentials;
pub mod session;

pub use claims::{decode_claims, is_token_expired, Claims, ClaimsError, EXPIRY_BUFFER_SECS};
pub use credentials::Credentials;
pub use session::{SessionManager, KEEPALIVE_INTERVAL};
