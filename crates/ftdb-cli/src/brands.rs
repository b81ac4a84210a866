//! The `brands` command: count known-brand mentions across broad queries.

use anyhow::Context;
use chrono::Utc;
use ftdb_analysis::{
    rank_mentions, run_brand_analysis, BrandMatcher, BrandMentionOutcome, BrandRanking,
    LookupBudget,
};
use ftdb_core::AppConfig;
use ftdb_serpapi::{SearchEngine, SearchParams, SerpApiClient};

use crate::pace::PacedProvider;

/// Broad web query, seeded with well-known names to keep results brand-dense.
const WEB_QUERIES: &[&str] =
    &["marcas de moda populares 2025 trending fashion brands zara nike adidas h&m"];

/// Product-oriented query for the optional Google Shopping pass.
const SHOPPING_QUERIES: &[&str] = &["moda feminina masculina"];

pub(crate) struct BrandRunOptions {
    pub dry_run: bool,
    pub shopping: bool,
    pub top: usize,
    pub budget: Option<u32>,
    pub no_persist: bool,
}

/// Run the web pass (and optionally a shopping pass), merge the outcomes,
/// print the ranking, and persist the run when a database is configured.
///
/// # Errors
///
/// Returns an error if the brand roster cannot be loaded, a brand pattern
/// fails to compile, the client cannot be constructed, or persistence fails.
pub(crate) async fn run_brands(
    config: &AppConfig,
    options: BrandRunOptions,
) -> anyhow::Result<()> {
    let roster = ftdb_core::load_brands(&config.brands_path)?;
    let matcher = BrandMatcher::new(&roster)?;

    let budget_max = options.budget.unwrap_or(config.max_lookups);

    if options.dry_run {
        let passes = if options.shopping { "web + shopping" } else { "web" };
        println!(
            "dry-run: would match {} brands across {passes} queries with a budget of {budget_max} lookups",
            roster.len()
        );
        return Ok(());
    }

    let api_key = config
        .serpapi_api_key
        .as_deref()
        .context("SERPAPI_API_KEY must be set to issue lookups")?;

    let started_at = Utc::now();
    let mut budget = LookupBudget::new(budget_max);

    let web_client = SerpApiClient::new(
        &config.serpapi_base_url,
        api_key,
        config.request_timeout_secs,
        search_params(config, SearchEngine::Google),
    )
    .context("failed to build SerpAPI client")?;
    let web = PacedProvider::new(web_client, config.inter_request_delay_ms);
    let queries = owned(WEB_QUERIES);
    let mut outcome = run_brand_analysis(&web, &queries, &matcher, &mut budget).await;

    if options.shopping {
        let shopping_client = SerpApiClient::new(
            &config.serpapi_base_url,
            api_key,
            config.request_timeout_secs,
            search_params(config, SearchEngine::GoogleShopping),
        )
        .context("failed to build SerpAPI shopping client")?;
        let shopping = PacedProvider::new(shopping_client, config.inter_request_delay_ms);
        let shopping_queries = owned(SHOPPING_QUERIES);
        let second = run_brand_analysis(&shopping, &shopping_queries, &matcher, &mut budget).await;
        outcome.absorb(second);
    }

    let rankings = rank_mentions(&outcome.tally);
    print_ranking(&rankings, &outcome, options.top);

    if options.no_persist {
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
    let run = ftdb_db::NewBrandRun {
        started_at,
        total_mentions: outcome.tally.total_mentions(),
        lookups_used: outcome.lookups_used,
        analysis_type: if options.shopping { "web+shopping" } else { "web" },
        rankings: &rankings,
        raw_matches: &outcome.raw_matches,
    };
    let run_id = ftdb_db::insert_brand_run(&pool, &run).await?;
    println!("\nsaved brand run {run_id}");

    Ok(())
}

fn search_params(config: &AppConfig, engine: SearchEngine) -> SearchParams {
    SearchParams {
        engine,
        country: config.search_country.clone(),
        language: config.search_language.clone(),
        per_query: config.results_per_query,
    }
}

fn owned(queries: &[&str]) -> Vec<String> {
    queries.iter().map(ToString::to_string).collect()
}

#[allow(clippy::cast_precision_loss)]
fn print_ranking(rankings: &[BrandRanking], outcome: &BrandMentionOutcome, top: usize) {
    println!("\n=== brand mention ranking ===");
    if rankings.is_empty() {
        println!("(no mentions found)");
    }
    for ranking in rankings.iter().take(top) {
        println!(
            "{:>2}. {:<20} {:>4} mentions  {:>6.2}%  {}",
            ranking.position,
            ranking.brand,
            ranking.mentions,
            ranking.percentage,
            percentage_bar(ranking.percentage),
        );
    }

    let total = outcome.tally.total_mentions();
    println!(
        "\n{total} total mentions across {} brands, {} lookups used",
        rankings.len(),
        outcome.lookups_used
    );
    if outcome.lookups_used > 0 && total > 0 {
        let efficiency = total as f64 / f64::from(outcome.lookups_used);
        println!("efficiency: {efficiency:.1} mentions per lookup");
    }
}

/// One bar tick per two percentage points, capped at half the line width.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percentage_bar(percentage: f64) -> String {
    let ticks = (percentage / 2.0).round().clamp(0.0, 50.0);
    "█".repeat(ticks as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_with_percentage() {
        assert_eq!(percentage_bar(0.0), "");
        assert_eq!(percentage_bar(10.0), "█".repeat(5));
        assert_eq!(percentage_bar(100.0), "█".repeat(50));
    }

    #[test]
    fn bar_never_exceeds_cap() {
        assert_eq!(percentage_bar(250.0), "█".repeat(50));
        assert_eq!(percentage_bar(-3.0), "");
    }
}
