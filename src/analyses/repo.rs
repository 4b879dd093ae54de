use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::report::NutritionReport;

/// One persisted analysis. Rows are append-only: written once at insert with
/// a server-assigned id and timestamp, never updated or deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoredAnalysis {
    pub id: i64,
    pub user_id: String,
    pub nome: Option<String>,
    pub resultado: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn create_table_if_not_exists(db: &PgPool) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id BIGSERIAL PRIMARY KEY,
            user_id TEXT NOT NULL,
            nome TEXT,
            resultado JSONB NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(db)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS analyses_user_created_idx
        ON analyses (user_id, created_at DESC)
        "#,
    )
    .execute(db)
    .await?;

    Ok(())
}

pub async fn insert_analysis(
    db: &PgPool,
    user_id: &str,
    nome: Option<&str>,
    report: &NutritionReport,
) -> sqlx::Result<StoredAnalysis> {
    sqlx::query_as::<_, StoredAnalysis>(
        r#"
        INSERT INTO analyses (user_id, nome, resultado)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, nome, resultado, created_at
        "#,
    )
    .bind(user_id)
    .bind(nome)
    .bind(sqlx::types::Json(report))
    .fetch_one(db)
    .await
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: &str,
    limit: i64,
) -> sqlx::Result<Vec<StoredAnalysis>> {
    sqlx::query_as::<_, StoredAnalysis>(
        r#"
        SELECT id, user_id, nome, resultado, created_at
        FROM analyses
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn stored_analysis_serializes_created_at_as_iso8601() {
        let row = StoredAnalysis {
            id: 7,
            user_id: "u1".into(),
            nome: Some("lunch".into()),
            resultado: serde_json::json!({"overview": "toast"}),
            created_at: datetime!(2024-05-01 12:30:00 UTC),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(value["id"], 7);
        assert_eq!(value["nome"], "lunch");
    }
}
