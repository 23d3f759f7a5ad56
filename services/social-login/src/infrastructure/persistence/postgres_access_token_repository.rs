use async_trait::async_trait;
use social_common::UserId;
use social_errors::{AppError, AppResult};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::AccessToken;
use crate::domain::repositories::AccessTokenRepository;

pub struct PostgresAccessTokenRepository {
    pool: PgPool,
}

impl PostgresAccessTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessTokenRepository for PostgresAccessTokenRepository {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<AccessToken>> {
        debug!("Finding access token");

        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            SELECT token, user_id, expires_at, created_at
            FROM access_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find access token: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }
}

#[derive(sqlx::FromRow)]
pub struct AccessTokenRow {
    pub token: String,
    pub user_id: Option<Uuid>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AccessTokenRow> for AccessToken {
    fn from(row: AccessTokenRow) -> Self {
        Self {
            token: row.token,
            user_id: row.user_id.map(UserId::from_uuid),
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}
