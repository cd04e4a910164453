use std::sync::Arc;

use log::{debug, trace};
use metatext_parser::{join_and_trim, tokenize, Span};
use metatext_protocol::{
    ChunkId, FinalizedSelection, PointerEvent, SelectionConfig, SelectionPhase, SelectionRange,
    ToolRequest,
};

use crate::clock::{Clock, MonotonicClock};
use crate::config::{validate, ConfigError};
use crate::dispatch::applicable_tools;
use crate::throttle::Throttle;

/// Cached inclusive index list keyed on the normalized range.
#[derive(Debug, Clone)]
struct Highlight {
    key: Option<(usize, usize)>,
    indices: Arc<[usize]>,
    empty: Arc<[usize]>,
}

impl Highlight {
    fn new() -> Self {
        let empty: Arc<[usize]> = Arc::from(Vec::new());
        Self {
            key: None,
            indices: empty.clone(),
            empty,
        }
    }

    fn refresh(&mut self, key: Option<(usize, usize)>) {
        if self.key == key {
            return;
        }
        self.key = key;
        self.indices = match key {
            Some((from, to)) => (from..=to).collect::<Vec<_>>().into(),
            None => self.empty.clone(),
        };
    }
}

/// Selection state for the words of one rendered chunk.
///
/// Events that make no sense in the current state (enter while idle,
/// out-of-range indices, a second release) are ignored.
#[derive(Debug)]
pub struct SelectionEngine<C: Clock = MonotonicClock> {
    words: Vec<String>,
    spans: Vec<Span>,
    generation: u64,
    range: Option<SelectionRange>,
    finalized: Option<FinalizedSelection>,
    throttle: Throttle<usize>,
    highlight: Highlight,
    clock: C,
}

impl SelectionEngine<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for SelectionEngine<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SelectionEngine<C> {
    /// Engine with the default 16ms throttle window.
    pub fn with_clock(clock: C) -> Self {
        Self::build(SelectionConfig::default(), clock)
    }

    pub fn with_config(config: SelectionConfig, clock: C) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self::build(config, clock))
    }

    fn build(config: SelectionConfig, clock: C) -> Self {
        Self {
            words: Vec::new(),
            spans: Vec::new(),
            generation: 0,
            range: None,
            finalized: None,
            throttle: Throttle::new(config.throttle_window()),
            highlight: Highlight::new(),
            clock,
        }
    }

    // --- Token sequence ---

    /// Tokenizes `text` and installs it as the word sequence.
    ///
    /// A different word sequence drops any selection.
    pub fn set_text(&mut self, text: &str) {
        let tokens = tokenize(text);
        let words: Vec<String> = tokens.iter().map(|t| t.text.to_string()).collect();
        let spans = tokens.iter().map(|t| t.span).collect();
        self.install(words, spans);
    }

    /// Installs pre-split words. Byte spans assume single-space separators.
    ///
    /// `words` must be tokenizer output: non-empty and free of whitespace.
    pub fn set_tokens(&mut self, words: Vec<String>) {
        debug_assert!(
            words
                .iter()
                .all(|w| !w.is_empty() && !w.chars().any(char::is_whitespace)),
            "set_tokens expects whitespace-split words"
        );
        let mut spans = Vec::with_capacity(words.len());
        let mut offset = 0;
        for word in &words {
            spans.push(Span::new(offset, offset + word.len()));
            offset += word.len() + 1;
        }
        self.install(words, spans);
    }

    fn install(&mut self, words: Vec<String>, spans: Vec<Span>) {
        self.spans = spans;
        if self.words == words {
            return;
        }
        self.words = words;
        self.generation += 1;
        if self.range.is_some() {
            debug!(
                "selection: token sequence replaced (generation {}), dropping selection",
                self.generation
            );
        }
        self.reset();
    }

    pub fn tokens(&self) -> &[String] {
        &self.words
    }

    pub fn token_count(&self) -> usize {
        self.words.len()
    }

    /// Bumped every time the word sequence actually changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- Pointer events ---

    /// Starts a new single-word selection at `index`, discarding any previous one.
    pub fn press(&mut self, index: usize) {
        if index >= self.words.len() {
            return;
        }
        self.range = Some(SelectionRange::pressed(index));
        self.finalized = None;
        self.throttle.reset();
        self.refresh_highlight();
        debug!("selection: press index={} of {}", index, self.words.len());
    }

    /// Extends the active selection to `index`, subject to the throttle.
    pub fn enter(&mut self, index: usize) {
        if index >= self.words.len() {
            return;
        }
        let now = self.clock.now();
        let Some(range) = self.range.as_mut().filter(|r| r.in_progress) else {
            return;
        };

        if self.throttle.offer(now, index) {
            range.end = index;
            trace!("selection: enter index={} applied at {:?}", index, now);
            self.refresh_highlight();
        } else {
            trace!("selection: enter index={} dropped at {:?}", index, now);
        }
    }

    /// Ends the gesture and produces the finalized text.
    pub fn release(&mut self) {
        let pending = self.throttle.take_pending();
        let Some(range) = self.range.as_mut().filter(|r| r.in_progress) else {
            return;
        };

        if let Some(index) = pending {
            range.end = index;
        }
        range.in_progress = false;

        let (from, to) = range.normalized();
        let text = join_and_trim(self.words.as_slice(), from, to);
        debug!("selection: finalized [{}, {}] text={:?}", from, to, text);

        self.finalized = Some(FinalizedSelection { text, from, to });
        self.refresh_highlight();
    }

    /// Pointer left the rendering surface. Finalizes an active drag.
    pub fn pointer_leave(&mut self) {
        if self.phase() == SelectionPhase::Selecting {
            debug!("selection: pointer left surface mid-drag");
            self.release();
        }
    }

    /// Drops any selection, from any state.
    pub fn clear(&mut self) {
        if self.range.is_some() {
            debug!("selection: cleared");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.range = None;
        self.finalized = None;
        self.throttle.reset();
        self.refresh_highlight();
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { index } => self.press(index),
            PointerEvent::Enter { index } => self.enter(index),
            PointerEvent::Release => self.release(),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::Clear => self.clear(),
        }
    }

    // --- Reads ---

    pub fn phase(&self) -> SelectionPhase {
        match self.range {
            None => SelectionPhase::Idle,
            Some(r) if r.in_progress => SelectionPhase::Selecting,
            Some(_) => SelectionPhase::Finalized,
        }
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    /// Ascending indices of the highlighted words.
    ///
    /// The returned `Arc` is the same allocation until the normalized range
    /// changes, so callers can skip work with `Arc::ptr_eq`.
    pub fn highlighted_indices(&self) -> Arc<[usize]> {
        self.highlight.indices.clone()
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.range.is_some_and(|r| r.contains(index))
    }

    pub fn finalized(&self) -> Option<&FinalizedSelection> {
        self.finalized.as_ref()
    }

    /// Finalized text, or `""` when nothing is finalized.
    pub fn finalized_text(&self) -> &str {
        self.finalized.as_ref().map_or("", |f| f.text.as_str())
    }

    /// Tool dispatch input for the finalized selection of `chunk`.
    ///
    /// `None` unless a gesture has been finalized.
    pub fn tool_request(&self, chunk: ChunkId) -> Option<ToolRequest> {
        let finalized = self.finalized.as_ref()?;
        let first = self.spans.get(finalized.from)?;
        let last = self.spans.get(finalized.to)?;
        let span = first.cover(*last);

        Some(ToolRequest {
            chunk,
            text: finalized.text.clone(),
            from: finalized.from,
            to: finalized.to,
            byte_start: span.start,
            byte_end: span.end,
            tools: applicable_tools(finalized, self.words.len()),
        })
    }

    fn refresh_highlight(&mut self) {
        self.highlight.refresh(self.range.map(|r| r.normalized()));
    }
}
