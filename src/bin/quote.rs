//! Offline quote tool.
//!
//! Loads a rate seed file into memory and prices one shipment request,
//! printing the quotes as JSON.
//!
//! ```text
//! quote --request shipment.json
//! quote --rates data/rates.json --request shipment.json --config pricing.toml
//! ```

use anyhow::Context;
use clap::Parser;
use shipping_quote::api::rest::{QuoteRequestDto, QuoteResponse};
use shipping_quote::config::{AppConfig, LoggingConfig};
use shipping_quote::domain::entities::ShipmentRequest;
use shipping_quote::infrastructure::persistence::in_memory::InMemoryRateRepository;
use shipping_quote::infrastructure::seed::{load_seed_file, seed_store};
use shipping_quote::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "quote", version, about = "Price a shipment against a rate file")]
struct Args {
    /// Rate seed file.
    #[arg(long, default_value = "data/rates.json")]
    rates: PathBuf,

    /// Shipment request in the `POST /v1/quotes` body layout.
    #[arg(long)]
    request: PathBuf,

    /// Config file with pricing and aggregation overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log engine decisions.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        let logging = LoggingConfig {
            filter: "shipping_quote=debug".to_string(),
            json: false,
        };
        telemetry::init(&logging).context("failed to initialise logging")?;
    }

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    };

    let repository = Arc::new(InMemoryRateRepository::new());
    let seed = load_seed_file(&args.rates).await?;
    seed_store(repository.as_ref(), &seed).await?;

    let body = tokio::fs::read_to_string(&args.request)
        .await
        .with_context(|| format!("failed to read {}", args.request.display()))?;
    let dto: QuoteRequestDto = serde_json::from_str(&body).context("malformed request")?;
    let request = ShipmentRequest::try_from(dto)?;

    let engine = config.build_engine(repository);
    let quotes = engine.quote(&request).await?;

    let response: Vec<QuoteResponse> = quotes.iter().map(QuoteResponse::from).collect();
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
