//! Database operations for brand mention runs.

use chrono::{DateTime, Utc};
use ftdb_analysis::{BrandRanking, RawMatch};
use rust_decimal::prelude::{Decimal, FromPrimitive};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `brand_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub total_mentions: i64,
    pub lookups_used: i32,
    pub analysis_type: String,
    pub created_at: DateTime<Utc>,
}

/// A brand run joined with its ranking aggregates, for history listings.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandRunSummary {
    pub id: i64,
    pub started_at: DateTime<Utc>,
    pub total_mentions: i64,
    pub lookups_used: i32,
    pub analysis_type: String,
    pub created_at: DateTime<Utc>,
    pub brands_ranked: i64,
    pub avg_mentions: Decimal,
}

/// Everything the core produced for one brand run.
#[derive(Debug)]
pub struct NewBrandRun<'a> {
    pub started_at: DateTime<Utc>,
    pub total_mentions: u64,
    pub lookups_used: u32,
    /// "web" or "web+shopping", depending on the passes that ran.
    pub analysis_type: &'a str,
    /// The FULL ranking; truncation is a display concern.
    pub rankings: &'a [BrandRanking],
    pub raw_matches: &'a [RawMatch],
}

/// Persist a brand run, its rankings, and the raw matched results.
///
/// Raw rows carry a SHA-256 hash of their URL (or title, for rows without a
/// URL) with a `(run_id, url_hash)` unique guard; conflicting rows are
/// skipped rather than erroring. Returns the run id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] on query failure or [`DbError::Serialize`] if
/// the brand list cannot be encoded; either way the transaction rolls back.
pub async fn insert_brand_run(pool: &PgPool, run: &NewBrandRun<'_>) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let run_id: i64 = sqlx::query_scalar(
        "INSERT INTO brand_runs (started_at, total_mentions, lookups_used, analysis_type) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind(run.started_at)
    .bind(i64::try_from(run.total_mentions).unwrap_or(i64::MAX))
    .bind(i32::try_from(run.lookups_used).unwrap_or(i32::MAX))
    .bind(run.analysis_type)
    .fetch_one(&mut *tx)
    .await?;

    for ranking in run.rankings {
        let percentage = Decimal::from_f64(ranking.percentage)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2);
        sqlx::query(
            "INSERT INTO brand_rankings (run_id, brand_name, mentions, rank_position, percentage) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(run_id)
        .bind(&ranking.brand)
        .bind(i64::try_from(ranking.mentions).unwrap_or(i64::MAX))
        .bind(i32::try_from(ranking.position).unwrap_or(i32::MAX))
        .bind(percentage)
        .execute(&mut *tx)
        .await?;
    }

    for raw in run.raw_matches {
        sqlx::query(
            "INSERT INTO raw_search_results \
                 (run_id, search_query, title, snippet, url, url_hash, brands_found) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (run_id, url_hash) DO NOTHING",
        )
        .bind(run_id)
        .bind(&raw.query)
        .bind(&raw.title)
        .bind(&raw.snippet)
        .bind(&raw.url)
        .bind(url_hash(raw))
        .bind(serde_json::to_value(&raw.brands_found)?)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(run_id)
}

/// List recent brand runs with ranking aggregates, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_brand_runs(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<BrandRunSummary>, DbError> {
    let rows = sqlx::query_as::<_, BrandRunSummary>(
        "SELECT b.id, b.started_at, b.total_mentions, b.lookups_used, b.analysis_type, \
                b.created_at, \
                COUNT(r.id) AS brands_ranked, \
                COALESCE(AVG(r.mentions), 0) AS avg_mentions \
         FROM brand_runs b \
         LEFT JOIN brand_rankings r ON r.run_id = b.id \
         GROUP BY b.id \
         ORDER BY b.created_at DESC, b.id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Dedup key for a raw row: SHA-256 hex of the URL, falling back to the
/// title for rows (knowledge panels) that have none.
fn url_hash(raw: &RawMatch) -> String {
    let key = if raw.url.is_empty() {
        &raw.title
    } else {
        &raw.url
    };
    format!("{:x}", Sha256::digest(key.as_bytes()))
}
