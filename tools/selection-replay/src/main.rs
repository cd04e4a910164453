use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use metatext_protocol::ChunkId;
use selection_replay::{load_config, replay};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about = "Replays a gesture script against chunk text and prints the selection as JSON")]
struct Cli {
    /// Chunk text to tokenize
    #[arg(short, long, value_name = "FILE")]
    text: PathBuf,

    /// Gesture script (press/enter/release/leave/clear lines)
    #[arg(short, long, value_name = "FILE")]
    script: PathBuf,

    /// Throttle window for enter events
    #[arg(long, env = "METATEXT_THROTTLE_MS")]
    throttle_ms: Option<u64>,

    /// JSON selection config, e.g. {"throttle_window_ms": 16}. Takes precedence over --throttle-ms
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    chunk_id: u32,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "selection_replay=info,metatext_selection=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.throttle_ms)?;

    tracing::info!("Reading chunk text from {:?}", cli.text);
    let text = fs::read_to_string(&cli.text)
        .with_context(|| format!("failed to read {:?}", cli.text))?;
    let script = fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read {:?}", cli.script))?;

    let report = replay(&text, &script, config, ChunkId::new(cli.chunk_id))?;
    tracing::info!(
        "Replayed {} events over {} words (window {}ms), final phase {:?}",
        report.steps.len(),
        report.tokens.len(),
        report.throttle_window_ms,
        report.phase
    );

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}
