mod color;
mod colorgorical;
mod error;
mod orchestrator;
mod palette;
mod provider;
mod sector;
mod selector;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;

use crate::error::AppError;
use crate::provider::ColorgoricalProvider;
use crate::sector::SectorThresholds;
use crate::selector::SelectorConfig;

/// Pick perceptually distinct alternative colors for every position of every
/// reference palette, drawing candidates from a Colorgorical server and
/// filtering them with local sectoring.
#[derive(Parser, Debug)]
#[command(name = "palette-alternatives", version, about)]
struct Args {
    /// Path to palettes.json
    #[arg(long, default_value = "palettes.json")]
    palettes: PathBuf,

    /// Output JSON path
    #[arg(long, default_value = "alternatives.json")]
    out: PathBuf,

    /// Colorgorical makePaletteCandidates endpoint
    #[arg(
        long,
        default_value = "http://localhost:8888/api/makePaletteCandidates"
    )]
    colorgorical_url: String,

    /// Candidates per Colorgorical call
    #[arg(long, default_value_t = 250)]
    pool_per_loop: usize,

    /// How many calls to accumulate per task
    #[arg(long, default_value_t = 6)]
    max_loops: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 90)]
    timeout: u64,

    /// Local hue tolerance in degrees
    #[arg(long, default_value_t = 20.0)]
    delta_h: f64,

    /// Local (L, C) radius tolerance
    #[arg(long, default_value_t = 10.0)]
    delta_r: f64,

    /// Alternatives to keep per palette position
    #[arg(long, default_value_t = 2)]
    topk: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), AppError> {
    let palettes = palette::load_palettes(&args.palettes)?;
    tracing::info!(
        "Loaded {} palettes from {}",
        palettes.len(),
        args.palettes.display()
    );

    let client = Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()?;
    let provider = ColorgoricalProvider::new(client, args.colorgorical_url);

    let config = SelectorConfig {
        thresholds: SectorThresholds {
            delta_h: args.delta_h,
            delta_r: args.delta_r,
        },
        target: args.topk,
        max_loops: args.max_loops,
        pool_size: args.pool_per_loop,
    };

    let results = orchestrator::run(&palettes, &provider, config).await?;

    // Written only once every task has resolved; a failed run leaves no file
    let file = std::fs::File::create(&args.out)?;
    serde_json::to_writer_pretty(file, &results)?;
    tracing::info!("Wrote {}", args.out.display());

    Ok(())
}
