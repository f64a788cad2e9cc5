use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Stored refresh token.
///
/// Usable only while `is_revoked` is false and `expires_at` is in the
/// future. Rows are revoked in place, never deleted (the user cascade is
/// the only physical delete path).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub is_revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Persist a freshly issued refresh token.
pub async fn insert_refresh_token<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (id, user_id, token, expires_at, is_revoked, created_at)
        VALUES ($1, $2, $3, $4, false, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(token)
    .bind(expires_at)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(())
}

/// Exact-match lookup of a non-revoked token.
///
/// Expiry is checked by the caller so an expired row can still be revoked.
pub async fn find_active_refresh_token<'e>(
    executor: impl PgExecutor<'e>,
    token: &str,
) -> Result<Option<RefreshToken>, sqlx::Error> {
    sqlx::query_as::<_, RefreshToken>(
        r#"
        SELECT id, user_id, token, expires_at, is_revoked, created_at
        FROM refresh_tokens
        WHERE token = $1 AND is_revoked = false
        "#,
    )
    .bind(token)
    .fetch_optional(executor)
    .await
}

/// Revoke a single token row by id.
pub async fn revoke_refresh_token_by_id<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE refresh_tokens SET is_revoked = true WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

/// Revoke all rows matching a token value. Updating zero rows is not an
/// error; logout stays idempotent.
pub async fn revoke_refresh_tokens_by_value<'e>(
    executor: impl PgExecutor<'e>,
    token: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE refresh_tokens SET is_revoked = true WHERE token = $1")
        .bind(token)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Bulk-revoke every non-revoked token whose expiry has passed.
///
/// A pure state transition: rerunning it, or racing it against live
/// refresh traffic, converges on the same end state.
pub async fn revoke_expired_refresh_tokens<'e>(
    executor: impl PgExecutor<'e>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET is_revoked = true
        WHERE is_revoked = false AND expires_at < now()
        "#,
    )
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}
