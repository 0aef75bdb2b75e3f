//! PostgreSQL implementation of PromptRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use agrimed::{DomainError, PageRequest, PromptRecord, PromptRepository};

use super::repository_error;

/// PostgreSQL implementation of PromptRepository
pub struct PgPromptRepository {
    pool: PgPool,
}

impl PgPromptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PromptRow {
    id: Uuid,
    user_prompt: String,
    ai_response: String,
    prompt_type: String,
    plant_type: Option<String>,
    disease_type: Option<String>,
    region: Option<String>,
    severity: Option<String>,
    confidence: Option<f64>,
    organic_only: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<PromptRow> for PromptRecord {
    type Error = DomainError;

    fn try_from(row: PromptRow) -> Result<Self, Self::Error> {
        let prompt_type = row
            .prompt_type
            .parse()
            .map_err(|e| DomainError::Repository(format!("prompt {}: {}", row.id, e)))?;
        Ok(Self {
            id: row.id,
            user_prompt: row.user_prompt,
            ai_response: row.ai_response,
            prompt_type,
            plant_type: row.plant_type,
            disease_type: row.disease_type,
            region: row.region,
            severity: row.severity,
            confidence: row.confidence,
            organic_only: row.organic_only,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PromptRepository for PgPromptRepository {
    async fn save(&self, record: &PromptRecord) -> Result<PromptRecord, DomainError> {
        let row = sqlx::query_as::<_, PromptRow>(
            r#"
            INSERT INTO prompts (
                id, user_prompt, ai_response, prompt_type, plant_type, disease_type,
                region, severity, confidence, organic_only, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(record.id)
        .bind(&record.user_prompt)
        .bind(&record.ai_response)
        .bind(record.prompt_type.as_str())
        .bind(&record.plant_type)
        .bind(&record.disease_type)
        .bind(&record.region)
        .bind(&record.severity)
        .bind(record.confidence)
        .bind(record.organic_only)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(repository_error)?;

        row.try_into()
    }

    async fn find_page(&self, page: &PageRequest) -> Result<Vec<PromptRecord>, DomainError> {
        let rows = sqlx::query_as::<_, PromptRow>(
            "SELECT * FROM prompts ORDER BY created_at DESC, id ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM prompts")
            .fetch_one(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(total.max(0) as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PromptRecord>, DomainError> {
        let row = sqlx::query_as::<_, PromptRow>("SELECT * FROM prompts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<Option<PromptRecord>, DomainError> {
        let row = sqlx::query_as::<_, PromptRow>("DELETE FROM prompts WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?;

        row.map(TryInto::try_into).transpose()
    }
}
