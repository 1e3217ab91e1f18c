//! Graph Analytics - CLI
//!
//! Runs recommendations, community detection and centrality ranking over an
//! interaction snapshot and prints plain-text (or JSON) reports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graph_analytics::report::{render_centrality, render_communities, render_recommendations};
use graph_analytics::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "graph-analytics")]
#[command(about = "Interaction graph analytics: recommendations, communities, centrality")]
struct Cli {
    /// YAML config file (defaults to ./config.yaml)
    #[arg(long, env = "ANALYTICS_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file to analyze (overrides config)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend unseen content for a consumer
    Recommend {
        /// Consumer id
        #[arg(short, long)]
        consumer: String,

        /// Maximum number of recommendations (defaults to config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List Louvain communities
    Communities,

    /// Rank nodes by degree centrality
    Centrality {
        /// Number of nodes to list (defaults to config)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Full analysis summary
    Analyze {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so reports on stdout stay clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,graph_analytics=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;
    if let Some(path) = cli.snapshot {
        config.snapshot_path = Some(path);
    }

    let engine = config.engine();
    let session = engine
        .session()
        .await
        .context("Failed to build interaction graph")?;
    tracing::info!(
        nodes = session.graph().node_count(),
        edges = session.graph().edge_count(),
        skipped = session.stats().interactions_skipped,
        "Interaction graph ready"
    );

    match cli.command {
        Commands::Recommend { consumer, limit } => {
            let limit = limit.unwrap_or(config.analytics.recommendation_limit);
            let entries = session
                .recommend(&consumer, limit)
                .with_context(|| format!("Cannot recommend for {consumer}"))?;
            print!("{}", render_recommendations(&entries));
        }
        Commands::Communities => {
            print!("{}", render_communities(&session.detect_communities()));
        }
        Commands::Centrality { top } => {
            let k = top.unwrap_or(config.analytics.centrality_top_k);
            print!("{}", render_centrality(&session.centrality_top(k)));
        }
        Commands::Analyze { json } => {
            let snapshot = session.analyze();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!(
                    "{} consumers, {} contents, {} interactions ({} skipped)",
                    snapshot.consumer_count,
                    snapshot.content_count,
                    snapshot.edge_count,
                    snapshot.build.interactions_skipped
                );
                println!(
                    "{} communities, modularity {:.4} ({} levels, {} ms)\n",
                    snapshot.communities.len(),
                    snapshot.modularity,
                    snapshot.louvain_levels,
                    snapshot.computation_ms
                );
                print!("{}", render_communities(&snapshot.communities));
                print!("{}", render_centrality(&snapshot.centrality));
            }
        }
    }

    Ok(())
}
