//! Abandonment-survey repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use vastra_core::{SurveyId, UserId};

use super::RepositoryError;
use crate::models::{AbandonmentSurvey, NewSurvey};

#[derive(Debug, sqlx::FromRow)]
struct SurveyRow {
    id: i32,
    user_id: Option<i32>,
    reasons: Vec<String>,
    comment: Option<String>,
    device: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SurveyRow> for AbandonmentSurvey {
    fn from(row: SurveyRow) -> Self {
        Self {
            id: SurveyId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            reasons: row.reasons,
            comment: row.comment,
            device: row.device,
            created_at: row.created_at,
        }
    }
}

/// Repository for abandonment-survey inserts.
pub struct SurveyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SurveyRepository<'a> {
    /// Create a new survey repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a survey response. The user is attached when the caller was
    /// authenticated, otherwise the row is anonymous.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Option<UserId>,
        input: &NewSurvey,
    ) -> Result<AbandonmentSurvey, RepositoryError> {
        let row = sqlx::query_as::<_, SurveyRow>(
            r"
            INSERT INTO abandonment_surveys (user_id, reasons, comment, device)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, reasons, comment, device, created_at
            ",
        )
        .bind(user_id.map(|id| id.as_i32()))
        .bind(&input.reasons)
        .bind(&input.comment)
        .bind(&input.device)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
