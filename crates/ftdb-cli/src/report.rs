//! The `report` command: list recent runs stored in the database.

use anyhow::Context;
use ftdb_core::AppConfig;

pub(crate) async fn run_report(config: &AppConfig, limit: i64) -> anyhow::Result<()> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for the report command")?;
    let pool = ftdb_db::connect_pool(database_url, ftdb_db::PoolConfig::from_env())
        .await
        .context("failed to connect to the database")?;
    ftdb_db::migrate(&pool).await?;

    let trend_runs = ftdb_db::list_recent_trend_runs(&pool, limit).await?;
    println!("=== recent trend runs ===");
    if trend_runs.is_empty() {
        println!("(none)");
    }
    for run in &trend_runs {
        println!(
            "{}  {}  {} keywords, average {}, {} lookups",
            run.public_id,
            run.started_at.format("%Y-%m-%d %H:%M"),
            run.total_keywords,
            run.average_score,
            run.lookups_used,
        );
    }

    let brand_runs = ftdb_db::list_recent_brand_runs(&pool, limit).await?;
    println!("\n=== recent brand runs ===");
    if brand_runs.is_empty() {
        println!("(none)");
    }
    for run in &brand_runs {
        println!(
            "run {}  {}  {} mentions across {} brands (avg {}), {} lookups, {}",
            run.id,
            run.started_at.format("%Y-%m-%d %H:%M"),
            run.total_mentions,
            run.brands_ranked,
            run.avg_mentions,
            run.lookups_used,
            run.analysis_type,
        );
    }

    Ok(())
}
