/// Access Token Generation and Verification
///
/// Access tokens are HS256 JWTs signed with the server secret from
/// `JwtSettings`. Verification distinguishes expiry, malformed input, and
/// bad signatures so the request boundary can answer with the right code.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, TokenError};

/// Generate a new access token for a user
///
/// # Errors
/// Returns an error if token signing fails.
pub fn generate_access_token(
    user_id: &Uuid,
    email: &str,
    config: &JwtSettings,
) -> Result<String, AppError> {
    let claims = Claims::new(
        *user_id,
        email.to_string(),
        config.access_token_expiry,
        config.issuer.clone(),
    );

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify an access token and extract its claims.
///
/// # Errors
/// - `TokenError::Expired` for a correctly signed token past its expiry
/// - `TokenError::Malformed` for input that does not parse as a JWT
/// - `TokenError::InvalidSignature` for a bad signature or wrong issuer
pub fn verify_access_token(token: &str, config: &JwtSettings) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    // Expiry is exact; the default 60s leeway would keep stale tokens alive.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("Access token verification failed: {}", e);
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenError::Malformed,
            _ => TokenError::InvalidSignature,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_config() -> JwtSettings {
        JwtSettings {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
            issuer: "fitgenius-test".to_string(),
        }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let config = get_test_config();
        let user_id = Uuid::new_v4();
        let email = "member@example.com";

        let token =
            generate_access_token(&user_id, email, &config).expect("Failed to generate token");
        let claims = verify_access_token(&token, &config).expect("Failed to verify token");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, email);
        assert_eq!(claims.iss, "fitgenius-test");
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let config = get_test_config();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(&user_id, "member@example.com", &config)
            .expect("Failed to generate token");

        let mut other = get_test_config();
        other.secret = "a-completely-different-secret-key-here".to_string();

        assert_eq!(
            verify_access_token(&token, &other).unwrap_err(),
            TokenError::InvalidSignature
        );
    }

    #[test]
    fn test_expired_token() {
        let mut config = get_test_config();
        config.access_token_expiry = -10;
        let user_id = Uuid::new_v4();

        let token = generate_access_token(&user_id, "member@example.com", &config)
            .expect("Failed to generate token");

        assert_eq!(
            verify_access_token(&token, &config).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let config = get_test_config();

        assert_eq!(
            verify_access_token("not-a-jwt-at-all", &config).unwrap_err(),
            TokenError::Malformed
        );
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = get_test_config();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(&user_id, "member@example.com", &config)
            .expect("Failed to generate token");

        let tampered = format!("{}X", token);
        assert!(verify_access_token(&tampered, &config).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let config = get_test_config();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(&user_id, "member@example.com", &config)
            .expect("Failed to generate token");

        let mut other = get_test_config();
        other.issuer = "someone-else".to_string();

        assert!(verify_access_token(&token, &other).is_err());
    }
}
