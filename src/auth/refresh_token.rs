/// Refresh Token Generation
///
/// Refresh tokens are opaque, high-entropy random strings. They are not
/// self-describing: the server looks them up by exact match in the
/// refresh_tokens table, where revocation and expiry state live.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// 128 alphanumeric characters, well above 64 bytes of randomness.
const REFRESH_TOKEN_LENGTH: usize = 128;

/// Generate a new cryptographically secure refresh token.
///
/// Collision probability is negligible; the token column's uniqueness
/// constraint would surface one as an insert failure anyway.
pub fn generate_refresh_token() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFRESH_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_refresh_token();

        assert_eq!(token.len(), REFRESH_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_refresh_token();
        let b = generate_refresh_token();
        assert_ne!(a, b);
    }
}
