//! Database operations for keyword trend runs.

use chrono::{DateTime, Utc};
use ftdb_analysis::KeywordBatchReport;
use rust_decimal::prelude::{Decimal, FromPrimitive};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `trend_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total_keywords: i32,
    pub average_score: Decimal,
    pub lookups_used: i32,
    pub created_at: DateTime<Utc>,
}

/// Persist a complete keyword batch report in one transaction.
///
/// Inserts the run row, one `keyword_results` row per analysis (in ranked
/// order), and the indicator frequency rollup. Returns the run id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or [`DbError::Serialize`] if a
/// JSON field cannot be encoded; either way the transaction rolls back.
pub async fn insert_trend_run(
    pool: &PgPool,
    started_at: DateTime<Utc>,
    report: &KeywordBatchReport,
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let average_score = Decimal::from_f64(report.average_score)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2);

    let run_id: i64 = sqlx::query_scalar(
        "INSERT INTO trend_runs (started_at, total_keywords, average_score, lookups_used) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(started_at)
    .bind(clamped_i32(report.total_keywords))
    .bind(average_score)
    .bind(i32::try_from(report.lookups_used).unwrap_or(i32::MAX))
    .fetch_one(&mut *tx)
    .await?;

    for analysis in &report.analyses {
        sqlx::query(
            "INSERT INTO keyword_results \
                 (run_id, keyword, popularity_score, result_count, trend_status, \
                  trend_indicators, related_searches) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(run_id)
        .bind(&analysis.keyword)
        .bind(i32::try_from(analysis.popularity_score).unwrap_or(i32::MAX))
        .bind(i32::try_from(analysis.result_count).unwrap_or(i32::MAX))
        .bind(analysis.status.label())
        .bind(serde_json::to_value(&analysis.trend_indicators)?)
        .bind(serde_json::to_value(&analysis.related_searches)?)
        .execute(&mut *tx)
        .await?;
    }

    for (indicator, frequency) in &report.indicator_frequencies {
        sqlx::query(
            "INSERT INTO indicator_frequencies (run_id, indicator, frequency) \
             VALUES ($1, $2, $3)",
        )
        .bind(run_id)
        .bind(indicator)
        .bind(i32::try_from(*frequency).unwrap_or(i32::MAX))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(run_id)
}

/// List recent trend runs, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_trend_runs(pool: &PgPool, limit: i64) -> Result<Vec<TrendRunRow>, DbError> {
    let rows = sqlx::query_as::<_, TrendRunRow>(
        "SELECT id, public_id, started_at, total_keywords, average_score, lookups_used, created_at \
         FROM trend_runs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

fn clamped_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
