/// Relational store contracts
///
/// Typed insert/select/update over the two tables. Every function is generic
/// over a `PgExecutor` so callers can run it against the pool directly or
/// inside a transaction.

mod refresh_tokens;
mod users;

pub use refresh_tokens::insert_refresh_token;
pub use refresh_tokens::find_active_refresh_token;
pub use refresh_tokens::revoke_expired_refresh_tokens;
pub use refresh_tokens::revoke_refresh_token_by_id;
pub use refresh_tokens::revoke_refresh_tokens_by_value;
pub use refresh_tokens::RefreshToken;
pub use users::find_user_by_email;
pub use users::find_user_by_id;
pub use users::insert_user;
pub use users::User;
