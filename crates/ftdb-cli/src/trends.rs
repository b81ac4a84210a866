//! The `trends` command: score configured keywords and rank them.

use anyhow::Context;
use chrono::Utc;
use ftdb_analysis::{run_keyword_analysis, KeywordBatchReport, LookupBudget};
use ftdb_core::{AppConfig, ScoringWeights, StatusThresholds};
use ftdb_serpapi::{SearchEngine, SearchParams, SerpApiClient};

use crate::pace::PacedProvider;

/// Score every configured keyword against Google results, print the ranked
/// report, and persist it when a database is configured.
///
/// # Errors
///
/// Returns an error if reference files cannot be loaded, the client cannot
/// be constructed, or persistence fails. Individual lookup failures are
/// absorbed by the batch driver and become zero-valued analyses.
pub(crate) async fn run_trends(
    config: &AppConfig,
    dry_run: bool,
    budget_override: Option<u32>,
    no_persist: bool,
) -> anyhow::Result<()> {
    let keywords = ftdb_core::load_keywords(&config.keywords_path)?;
    let lexicon = ftdb_core::load_lexicon(&config.lexicon_path)?;
    let (weights, thresholds) = match &config.scoring_path {
        Some(path) => ftdb_core::load_scoring(path)?,
        None => (ScoringWeights::default(), StatusThresholds::default()),
    };

    let budget_max = budget_override.unwrap_or(config.max_lookups);

    if dry_run {
        println!(
            "dry-run: would score {} keywords with a budget of {budget_max} lookups:",
            keywords.keywords.len()
        );
        for keyword in &keywords.keywords {
            println!("  - {keyword}");
        }
        return Ok(());
    }

    let api_key = config
        .serpapi_api_key
        .as_deref()
        .context("SERPAPI_API_KEY must be set to issue lookups")?;
    let client = SerpApiClient::new(
        &config.serpapi_base_url,
        api_key,
        config.request_timeout_secs,
        SearchParams {
            engine: SearchEngine::Google,
            country: config.search_country.clone(),
            language: config.search_language.clone(),
            per_query: config.results_per_query,
        },
    )
    .context("failed to build SerpAPI client")?;
    let provider = PacedProvider::new(client, config.inter_request_delay_ms);

    let started_at = Utc::now();
    let mut budget = LookupBudget::new(budget_max);
    let report = run_keyword_analysis(
        &provider,
        &keywords.keywords,
        &lexicon,
        &weights,
        &thresholds,
        &mut budget,
    )
    .await;

    print_report(&report);

    if no_persist {
        return Ok(());
    }
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set; skipping persistence");
        return Ok(());
    };
    let pool = ftdb_db::connect_pool(database_url, ftdb_db::PoolConfig::from_env())
        .await
        .context("failed to connect to the database")?;
    ftdb_db::migrate(&pool).await?;
    let run_id = ftdb_db::insert_trend_run(&pool, started_at, &report).await?;
    println!("\nsaved trend run {run_id}");

    Ok(())
}

fn print_report(report: &KeywordBatchReport) {
    println!("\n=== keyword popularity ranking ===");
    for (index, analysis) in report.analyses.iter().enumerate() {
        println!(
            "{:>2}. {:<30} {:>3}/100  {}",
            index + 1,
            analysis.keyword,
            analysis.popularity_score,
            analysis.status,
        );
        if !analysis.trend_indicators.is_empty() {
            let indicators: Vec<&str> = analysis
                .trend_indicators
                .iter()
                .map(String::as_str)
                .collect();
            println!("    indicators: {}", indicators.join(", "));
        }
    }

    println!(
        "\n{} keywords scored, average {:.1}, {} lookups used",
        report.total_keywords, report.average_score, report.lookups_used
    );
    if !report.indicator_frequencies.is_empty() {
        println!("indicator frequencies:");
        for (indicator, count) in &report.indicator_frequencies {
            println!("  {indicator}: {count}");
        }
    }
}
