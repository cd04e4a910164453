//! Replays recorded gesture scripts against a chunk of text.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use metatext_parser::{parse_script, TimedEvent};
use metatext_protocol::{ChunkId, SelectionConfig, SelectionPhase, ToolRequest};
use metatext_selection::{ManualClock, SelectionEngine};
use serde::Serialize;

/// Engine state after one event.
#[derive(Debug, Serialize)]
pub struct Step {
    pub line: usize,
    pub at_ms: u64,
    pub event: &'static str,
    pub phase: SelectionPhase,
    pub highlighted: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub tokens: Vec<String>,
    pub throttle_window_ms: u64,
    pub steps: Vec<Step>,
    pub phase: SelectionPhase,
    pub finalized_text: String,
    pub tool_request: Option<ToolRequest>,
}

/// Resolves the engine config: a JSON file wins over an explicit window,
/// which wins over the 16ms default. Missing JSON fields take defaults.
pub fn load_config(path: Option<&Path>, throttle_ms: Option<u64>) -> anyhow::Result<SelectionConfig> {
    if let Some(path) = path {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        return serde_json::from_str(&raw).with_context(|| format!("invalid config {:?}", path));
    }

    Ok(match throttle_ms {
        Some(ms) => SelectionConfig::with_throttle_window_ms(ms),
        None => SelectionConfig::default(),
    })
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Runs every event of `events` through a fresh engine over `text`.
pub fn replay_events(
    text: &str,
    events: &[TimedEvent],
    config: SelectionConfig,
    chunk: ChunkId,
) -> anyhow::Result<ReplayReport> {
    let clock = ManualClock::new();
    let mut engine = SelectionEngine::with_config(config, clock.clone())?;
    engine.set_text(text);

    let mut steps = Vec::with_capacity(events.len());
    for timed in events {
        clock.set(timed.at);
        engine.apply(timed.event);

        steps.push(Step {
            line: timed.line,
            at_ms: millis(timed.at),
            event: timed.event.name(),
            phase: engine.phase(),
            highlighted: engine.highlighted_indices().to_vec(),
        });
    }

    Ok(ReplayReport {
        tokens: engine.tokens().to_vec(),
        throttle_window_ms: config.throttle_window_ms,
        steps,
        phase: engine.phase(),
        finalized_text: engine.finalized_text().to_string(),
        tool_request: engine.tool_request(chunk),
    })
}

/// Parses `script` and replays it.
pub fn replay(
    text: &str,
    script: &str,
    config: SelectionConfig,
    chunk: ChunkId,
) -> anyhow::Result<ReplayReport> {
    let events = parse_script(script).context("invalid gesture script")?;
    replay_events(text, &events, config, chunk)
}
