use clap::{Parser, Subcommand};

mod brands;
mod pace;
mod report;
mod trends;

#[derive(Debug, Parser)]
#[command(name = "ftdb")]
#[command(about = "Fashion trends command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score the configured keywords and rank them by popularity.
    Trends {
        /// Print what would run without issuing lookups or writing rows.
        #[arg(long)]
        dry_run: bool,
        /// Override the lookup budget for this run.
        #[arg(long)]
        budget: Option<u32>,
        /// Skip persistence even when a database is configured.
        #[arg(long)]
        no_persist: bool,
    },
    /// Count known-brand mentions across broad fashion queries.
    Brands {
        /// Print what would run without issuing lookups or writing rows.
        #[arg(long)]
        dry_run: bool,
        /// Add a Google Shopping pass on top of the web pass.
        #[arg(long)]
        shopping: bool,
        /// How many ranked brands to display.
        #[arg(long, default_value_t = 20)]
        top: usize,
        /// Override the lookup budget for this run.
        #[arg(long)]
        budget: Option<u32>,
        /// Skip persistence even when a database is configured.
        #[arg(long)]
        no_persist: bool,
    },
    /// List recent runs stored in the database.
    Report {
        /// How many runs of each kind to show.
        #[arg(long, default_value_t = 5)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` and argument errors never depend on the
    // environment being configured.
    let cli = Cli::parse();

    let config = ftdb_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    match cli.command {
        Commands::Trends {
            dry_run,
            budget,
            no_persist,
        } => trends::run_trends(&config, dry_run, budget, no_persist).await,
        Commands::Brands {
            dry_run,
            shopping,
            top,
            budget,
            no_persist,
        } => {
            brands::run_brands(
                &config,
                brands::BrandRunOptions {
                    dry_run,
                    shopping,
                    top,
                    budget,
                    no_persist,
                },
            )
            .await
        }
        Commands::Report { limit } => report::run_report(&config, limit).await,
    }
}
