mod api;
mod config;
mod models;
mod output;
mod services;
mod sources;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use services::{PairCache, PoolCollector};
use sources::{HttpTransport, PairFetcher, RetryPolicy};

#[derive(Parser, Debug)]
#[command(version, about = "Liquidity, volume and trade metrics for DEX pools via DexScreener")]
struct Cli {
    /// Path to config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Chain identifier used in DexScreener pair URLs (overrides config)
    #[arg(long, global = true)]
    chain: Option<String>,

    /// Retries per pool after the first attempt (overrides config)
    #[arg(long, global = true)]
    max_retries: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the pools once and print the report
    Report(ReportArgs),
    /// Serve reports over HTTP (POST /report)
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Pool addresses; read from --file or stdin when omitted
    addresses: Vec<String>,

    /// File with one pool address per line
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Include raw JSON of the first fetched pair
    #[arg(long)]
    raw: bool,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pool_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(chain) = cli.chain {
        config.source.chain = chain;
    }
    if let Some(max_retries) = cli.max_retries {
        config.retry.max_retries = max_retries;
    }
    tracing::debug!("✓ Configuration loaded: {:?}", config);

    let cache = Arc::new(PairCache::new(config.cache.ttl()));
    let transport = Arc::new(HttpTransport::new(config.source.timeout())?);
    let fetcher = PairFetcher::new(
        transport,
        cache.clone(),
        &config.source.base_url,
        RetryPolicy {
            max_retries: config.retry.max_retries,
            backoff: config.retry.backoff(),
        },
    );
    let collector = Arc::new(PoolCollector::new(fetcher, &config.source.chain));

    match cli.command {
        Command::Report(args) => run_report(&collector, args).await,
        Command::Serve(args) => {
            let host = args.host.unwrap_or(config.server.host);
            let port = args.port.unwrap_or(config.server.port);
            let state = Arc::new(api::AppState { collector, cache });
            api::serve(&format!("{}:{}", host, port), state).await
        }
    }
}

async fn run_report(collector: &PoolCollector, args: ReportArgs) -> anyhow::Result<()> {
    let input = if !args.addresses.is_empty() {
        args.addresses.join("\n")
    } else if let Some(path) = &args.file {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        std::io::read_to_string(std::io::stdin()).context("reading addresses from stdin")?
    };

    let progress = ProgressBar::new(0);
    progress.set_style(ProgressStyle::with_template(
        "{spinner} [{bar:30}] {pos}/{len} {msg}",
    )?);

    match collector.refresh_with_progress(&input, &progress).await {
        Ok(report) if args.json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Ok(report) => {
            print!("{}", output::render_report(&report, args.raw));
            Ok(())
        }
        Err(e) => {
            eprint!("{}", output::render_warnings(e.warnings()));
            Err(e.into())
        }
    }
}
