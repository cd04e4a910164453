use std::sync::Arc;

use metatext_protocol::ChunkId;
use proptest::prelude::*;

use super::*;

const FOX: &str = "The quick brown fox";

fn engine(text: &str) -> (SelectionEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut engine = SelectionEngine::with_clock(clock.clone());
    engine.set_text(text);
    (engine, clock)
}

#[test]
fn test_idle_enter_and_release_change_nothing() {
    let (mut engine, _clock) = engine(FOX);
    let before = engine.highlighted_indices();

    engine.enter(2);
    engine.release();
    engine.pointer_leave();

    assert_eq!(engine.phase(), SelectionPhase::Idle);
    assert!(engine.highlighted_indices().is_empty());
    assert!(Arc::ptr_eq(&before, &engine.highlighted_indices()));
    assert_eq!(engine.finalized_text(), "");
}

#[test]
fn test_release_after_finalize_keeps_text() {
    let (mut engine, clock) = engine(FOX);
    engine.press(1);
    clock.set_millis(20);
    engine.enter(2);
    engine.release();

    engine.enter(3);
    engine.release();

    assert_eq!(engine.phase(), SelectionPhase::Finalized);
    assert_eq!(&*engine.highlighted_indices(), &[1, 2]);
    assert_eq!(engine.finalized_text(), "quick brown");
}

#[test]
fn test_single_word_click() {
    let (mut engine, _clock) = engine("She said, \"Hello!\" twice");
    engine.press(2);
    assert_eq!(engine.phase(), SelectionPhase::Selecting);
    engine.release();

    assert_eq!(&*engine.highlighted_indices(), &[2]);
    assert_eq!(engine.finalized_text(), "Hello");
    let finalized = engine.finalized().unwrap();
    assert_eq!((finalized.from, finalized.to), (2, 2));
}

#[test]
fn test_backward_drag_is_normalized() {
    let (mut engine, _clock) = engine(FOX);
    engine.press(3);
    engine.enter(1);
    engine.release();

    assert_eq!(&*engine.highlighted_indices(), &[1, 2, 3]);
    assert_eq!(engine.finalized_text(), "quick brown fox");
    assert_eq!(engine.range().unwrap().start, 3);
}

#[test]
fn test_three_word_drag() {
    let (mut engine, clock) = engine(FOX);
    engine.press(1);
    clock.set_millis(20);
    engine.enter(2);
    clock.set_millis(40);
    engine.enter(3);
    engine.release();

    assert_eq!(&*engine.highlighted_indices(), &[1, 2, 3]);
    assert_eq!(engine.finalized_text(), "quick brown fox");
}

#[test]
fn test_throttled_enters_keep_last_index_sent() {
    let (mut engine, clock) = engine("a b c d e f");
    engine.press(0);

    clock.set_millis(100);
    engine.enter(1);
    assert_eq!(&*engine.highlighted_indices(), &[0, 1]);

    // inside the 16ms window: not applied yet
    clock.set_millis(105);
    engine.enter(2);
    clock.set_millis(110);
    engine.enter(3);
    assert_eq!(&*engine.highlighted_indices(), &[0, 1]);

    // release flushes the most recent dropped sample
    engine.release();
    assert_eq!(&*engine.highlighted_indices(), &[0, 1, 2, 3]);
    assert_eq!(engine.finalized_text(), "a b c d");
}

#[test]
fn test_reopened_window_supersedes_dropped_sample() {
    let (mut engine, clock) = engine("a b c d e f");
    engine.press(0);
    engine.enter(4);

    clock.set_millis(5);
    engine.enter(5);
    clock.set_millis(16);
    engine.enter(2);
    assert_eq!(&*engine.highlighted_indices(), &[0, 1, 2]);

    engine.release();
    assert_eq!(engine.finalized_text(), "a b c");
}

#[test]
fn test_new_press_discards_finalized_text_immediately() {
    let (mut engine, clock) = engine(FOX);
    engine.press(0);
    clock.set_millis(20);
    engine.enter(1);
    engine.release();
    assert_eq!(engine.finalized_text(), "The quick");

    engine.press(3);
    assert_eq!(engine.finalized_text(), "");
    assert!(engine.finalized().is_none());
    assert_eq!(engine.phase(), SelectionPhase::Selecting);
    assert_eq!(&*engine.highlighted_indices(), &[3]);
}

#[test]
fn test_repress_same_index_is_fresh_selection() {
    let (mut engine, _clock) = engine(FOX);
    engine.press(2);
    engine.release();
    engine.press(2);
    engine.release();

    assert_eq!(engine.finalized_text(), "brown");
    assert_eq!(&*engine.highlighted_indices(), &[2]);
}

#[test]
fn test_token_change_mid_drag_goes_idle() {
    let (mut engine, clock) = engine(FOX);
    engine.press(0);
    clock.set_millis(20);
    engine.enter(2);
    let generation = engine.generation();

    engine.set_text("An entirely different chunk");

    assert_eq!(engine.phase(), SelectionPhase::Idle);
    assert!(engine.highlighted_indices().is_empty());
    assert_eq!(engine.generation(), generation + 1);

    // the stale drag cannot be resumed
    engine.enter(3);
    engine.release();
    assert_eq!(engine.phase(), SelectionPhase::Idle);
    assert_eq!(engine.finalized_text(), "");
}

#[test]
fn test_identical_tokens_keep_selection() {
    let (mut engine, _clock) = engine(FOX);
    engine.press(1);
    engine.release();

    engine.set_text("The  quick\nbrown fox");
    assert_eq!(engine.phase(), SelectionPhase::Finalized);
    assert_eq!(engine.finalized_text(), "quick");
}

#[test]
fn test_trim_keeps_inner_punctuation() {
    let (mut engine, _clock) = engine("``Well, hello!");
    engine.press(0);
    engine.enter(1);
    engine.release();

    assert_eq!(engine.finalized_text(), "Well, hello");
}

#[test]
fn test_pointer_leave_mid_drag_finalizes() {
    let (mut engine, clock) = engine(FOX);
    engine.press(0);
    clock.set_millis(20);
    engine.enter(1);
    engine.pointer_leave();

    assert_eq!(engine.phase(), SelectionPhase::Finalized);
    assert_eq!(&*engine.highlighted_indices(), &[0, 1]);
    assert_eq!(engine.finalized_text(), "The quick");
}

#[test]
fn test_clear_mid_drag_resets() {
    let (mut engine, _clock) = engine(FOX);
    engine.press(1);
    engine.enter(3);
    engine.clear();

    assert_eq!(engine.phase(), SelectionPhase::Idle);
    assert!(engine.range().is_none());
    assert!(engine.highlighted_indices().is_empty());

    engine.release();
    assert_eq!(engine.finalized_text(), "");
}

#[test]
fn test_out_of_bounds_indices_are_ignored() {
    let (mut engine, clock) = engine(FOX);
    engine.press(4);
    assert_eq!(engine.phase(), SelectionPhase::Idle);

    engine.press(1);
    clock.set_millis(20);
    engine.enter(99);
    engine.release();
    assert_eq!(engine.finalized_text(), "quick");
}

#[test]
fn test_empty_chunk_never_selects() {
    let (mut engine, _clock) = engine("   ");
    assert_eq!(engine.token_count(), 0);
    engine.press(0);
    engine.release();
    assert_eq!(engine.phase(), SelectionPhase::Idle);
}

#[test]
fn test_highlight_is_reused_while_range_is_unchanged() {
    let (mut engine, clock) = engine(FOX);
    engine.press(1);
    clock.set_millis(20);
    engine.enter(2);
    let during = engine.highlighted_indices();

    // same end again, then release: normalized pair unchanged
    clock.set_millis(40);
    engine.enter(2);
    engine.release();
    assert!(Arc::ptr_eq(&during, &engine.highlighted_indices()));

    engine.press(0);
    assert!(!Arc::ptr_eq(&during, &engine.highlighted_indices()));
}

#[test]
fn test_apply_dispatches_protocol_events() {
    let (mut engine, clock) = engine(FOX);
    engine.apply(PointerEvent::Press { index: 2 });
    clock.set_millis(20);
    engine.apply(PointerEvent::Enter { index: 0 });
    engine.apply(PointerEvent::Leave);
    assert_eq!(engine.finalized_text(), "The quick brown");

    engine.apply(PointerEvent::Clear);
    assert_eq!(engine.phase(), SelectionPhase::Idle);
}

#[test]
fn test_tool_request_for_phrase_and_word() {
    let (mut engine, clock) = engine("The quick, brown fox");
    assert!(engine.tool_request(ChunkId(7)).is_none());

    engine.press(1);
    assert!(engine.tool_request(ChunkId(7)).is_none());
    clock.set_millis(20);
    engine.enter(2);
    engine.release();

    let request = engine.tool_request(ChunkId(7)).unwrap();
    assert_eq!(request.chunk, ChunkId(7));
    assert_eq!(request.text, "quick, brown");
    assert_eq!((request.byte_start, request.byte_end), (4, 16));
    assert_eq!(request.tools, ToolSet::EXPLAIN);
    assert!(request.is_phrase());

    engine.press(3);
    engine.release();
    let request = engine.tool_request(ChunkId(7)).unwrap();
    assert_eq!(request.tools, ToolSet::DEFINE | ToolSet::EXPLAIN);
    assert!(!request.is_phrase());
}

#[test]
fn test_set_tokens_synthesizes_spans() {
    let clock = ManualClock::new();
    let mut engine = SelectionEngine::with_clock(clock);
    engine.set_tokens(vec!["alpha".into(), "beta".into(), "gamma".into()]);
    engine.press(1);
    engine.release();

    let request = engine.tool_request(ChunkId(1)).unwrap();
    assert_eq!((request.byte_start, request.byte_end), (6, 10));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "whitespace-split words")]
fn test_set_tokens_rejects_unsplit_words() {
    let mut engine = SelectionEngine::with_clock(ManualClock::new());
    engine.set_tokens(vec!["two words".into(), "ok".into()]);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "whitespace-split words")]
fn test_set_tokens_rejects_empty_word() {
    let mut engine = SelectionEngine::with_clock(ManualClock::new());
    engine.set_tokens(vec!["alpha".into(), String::new()]);
}

#[test]
fn test_rejects_oversized_throttle_window() {
    let result = SelectionEngine::with_config(
        SelectionConfig::with_throttle_window_ms(5000),
        ManualClock::new(),
    );
    assert!(matches!(result, Err(ConfigError::ThrottleWindowTooLarge { .. })));
}

#[test]
fn test_zero_window_applies_every_enter() {
    let clock = ManualClock::new();
    let mut engine =
        SelectionEngine::with_config(SelectionConfig::with_throttle_window_ms(0), clock).unwrap();
    engine.set_text(FOX);
    engine.press(0);
    engine.enter(1);
    engine.enter(2);
    assert_eq!(&*engine.highlighted_indices(), &[0, 1, 2]);
}

proptest! {
    #[test]
    fn test_drag_direction_does_not_matter(
        (len, a, b) in (2usize..40)
            .prop_flat_map(|len| (Just(len), 1..len))
            .prop_flat_map(|(len, a)| (Just(len), Just(a), 0..a)),
    ) {
        let text = (0..len).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let (mut engine, _clock) = engine(&text);

        engine.press(a);
        engine.enter(b);
        engine.release();

        let expected: Vec<usize> = (b..=a).collect();
        prop_assert_eq!(&*engine.highlighted_indices(), expected.as_slice());
    }

    #[test]
    fn test_release_reflects_last_enter_sent(
        start in 0usize..20,
        moves in proptest::collection::vec((0usize..20, 0u64..40), 1..30),
    ) {
        let text = (0..20).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let (mut engine, clock) = engine(&text);

        engine.press(start);
        for &(index, delta) in &moves {
            clock.advance(std::time::Duration::from_millis(delta));
            engine.enter(index);
        }
        engine.release();

        let last = moves.last().map(|m| m.0).unwrap_or(start);
        prop_assert_eq!(engine.range().map(|r| r.end), Some(last));
        prop_assert_eq!(engine.phase(), SelectionPhase::Finalized);
    }
}
