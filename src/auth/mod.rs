/// Authentication module
///
/// Access-token generation/verification, password hashing, refresh-token
/// generation, and the lifecycle service composing them.

mod claims;
mod jwt;
mod password;
mod refresh_token;
mod service;

pub use claims::Claims;
pub use jwt::generate_access_token;
pub use jwt::verify_access_token;
pub use password::hash_password;
pub use password::verify_password;
pub use refresh_token::generate_refresh_token;
pub use service::AccessGrant;
pub use service::AuthService;
pub use service::NewUser;
pub use service::RegisteredUser;
pub use service::SessionTokens;
