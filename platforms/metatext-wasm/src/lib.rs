use std::sync::Arc;
use std::time::Duration;

use metatext_parser::tokenize;
use metatext_protocol::{ChunkId, PointerEvent, SelectionConfig, SelectionPhase};
use metatext_selection::{ManualClock, SelectionEngine};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// A word as the host page renders it.
#[derive(Serialize)]
pub struct WordView {
    pub index: usize,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Splits chunk text into the words the host should render, one element each.
#[wasm_bindgen(js_name = tokenize)]
pub fn tokenize_chunk(text: &str) -> Result<JsValue, JsValue> {
    let words: Vec<WordView> = tokenize(text)
        .into_iter()
        .enumerate()
        .map(|(index, t)| WordView {
            index,
            text: t.text.to_string(),
            start: t.span.start,
            end: t.span.end,
        })
        .collect();

    serde_wasm_bindgen::to_value(&words).map_err(JsValue::from)
}

/// `event.timeStamp` (DOMHighResTimeStamp, ms) to a duration. Garbage maps to zero.
fn millis_to_duration(timestamp_ms: f64) -> Duration {
    if timestamp_ms.is_finite() && timestamp_ms > 0.0 {
        Duration::from_nanos((timestamp_ms * 1_000_000.0) as u64)
    } else {
        Duration::ZERO
    }
}

fn phase_name(phase: SelectionPhase) -> &'static str {
    match phase {
        SelectionPhase::Idle => "idle",
        SelectionPhase::Selecting => "selecting",
        SelectionPhase::Finalized => "finalized",
    }
}

/// One selection engine per rendered chunk.
///
/// The host forwards `event.timeStamp` with every event so throttling uses
/// the browser's monotonic clock.
#[wasm_bindgen]
pub struct WordSelector {
    engine: SelectionEngine<ManualClock>,
    clock: ManualClock,
    chunk: ChunkId,
    // Last array handed to JS, reused while the highlight is unchanged
    highlight_cache: Option<(Arc<[usize]>, JsValue)>,
}

#[wasm_bindgen]
impl WordSelector {
    /// `config` may be `undefined` or `{ throttle_window_ms }`.
    #[wasm_bindgen(constructor)]
    pub fn new(chunk_id: u32, text: &str, config: JsValue) -> Result<WordSelector, JsValue> {
        let config: SelectionConfig = if config.is_undefined() || config.is_null() {
            SelectionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let clock = ManualClock::new();
        let mut engine = SelectionEngine::with_config(config, clock.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        engine.set_text(text);

        Ok(Self {
            engine,
            clock,
            chunk: ChunkId::new(chunk_id),
            highlight_cache: None,
        })
    }

    /// Replaces the chunk text. Drops the selection if the words changed.
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, text: &str) {
        self.engine.set_text(text);
    }

    pub fn press(&mut self, index: usize, timestamp_ms: f64) {
        self.clock.set(millis_to_duration(timestamp_ms));
        self.engine.press(index);
    }

    /// Mouse enter, or a touchmove the host already hit-tested to `index`.
    pub fn enter(&mut self, index: usize, timestamp_ms: f64) {
        self.clock.set(millis_to_duration(timestamp_ms));
        self.engine.enter(index);
    }

    pub fn release(&mut self) {
        self.engine.release();
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.engine.pointer_leave();
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    /// Applies `{ kind: "press" | "enter" | "release" | "leave" | "clear", index? }`.
    #[wasm_bindgen(js_name = applyEvent)]
    pub fn apply_event(&mut self, event: JsValue, timestamp_ms: f64) -> Result<(), JsValue> {
        let event: PointerEvent = serde_wasm_bindgen::from_value(event)?;
        self.clock.set(millis_to_duration(timestamp_ms));
        self.engine.apply(event);
        Ok(())
    }

    pub fn phase(&self) -> String {
        phase_name(self.engine.phase()).to_string()
    }

    /// Ascending highlighted indices. Returns the same JS array object until
    /// the highlighted range changes.
    #[wasm_bindgen(js_name = highlightedIndices)]
    pub fn highlighted_indices(&mut self) -> Result<JsValue, JsValue> {
        let current = self.engine.highlighted_indices();
        if let Some((cached, value)) = &self.highlight_cache {
            if Arc::ptr_eq(cached, &current) {
                return Ok(value.clone());
            }
        }

        let indices: &[usize] = &current;
        let value = serde_wasm_bindgen::to_value(&indices)?;
        self.highlight_cache = Some((current, value.clone()));
        Ok(value)
    }

    #[wasm_bindgen(js_name = isHighlighted)]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.engine.is_highlighted(index)
    }

    #[wasm_bindgen(js_name = finalizedText)]
    pub fn finalized_text(&self) -> String {
        self.engine.finalized_text().to_string()
    }

    /// Tool dispatch input, or `null` until a gesture is finalized.
    #[wasm_bindgen(js_name = toolRequest)]
    pub fn tool_request(&self) -> Result<JsValue, JsValue> {
        match self.engine.tool_request(self.chunk) {
            Some(request) => serde_wasm_bindgen::to_value(&request).map_err(JsValue::from),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = tokenCount)]
    pub fn token_count(&self) -> usize {
        self.engine.token_count()
    }
}
