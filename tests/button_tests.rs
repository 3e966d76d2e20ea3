//! Button Interpreter Tests
//!
//! Tests for debouncing and press-duration classification.
//! Run with: cargo test --test button_tests

use fm_firmware::button::{ButtonEvent, ButtonInterpreter};
use fm_firmware::config::{LONG_PRESS_TICKS, SHORT_PRESS_TICKS, VERY_LONG_PRESS_TICKS};
use fm_firmware::types::Press;

/// Hold for `held` ticks, then release; returns every event produced
fn press_for(interp: &mut ButtonInterpreter, held: u16) -> Vec<ButtonEvent> {
    let mut events = Vec::new();
    for _ in 0..held {
        events.extend(interp.tick(true));
    }
    // Four inactive samples complete the release debounce
    for _ in 0..4 {
        events.extend(interp.tick(false));
    }
    events
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn idle_produces_no_events() {
    let mut interp = ButtonInterpreter::new();
    for _ in 0..100 {
        assert_eq!(interp.tick(false), None);
    }
}

#[test]
fn tap_below_threshold_is_unclassified() {
    // Hold time keeps accumulating through the debounce window, so
    // only a very quick tap stays under the short threshold
    let mut interp = ButtonInterpreter::new();
    let events = press_for(&mut interp, 1);
    assert_eq!(events, vec![ButtonEvent::Release(None)]);
}

#[test]
fn short_press_classification() {
    let mut interp = ButtonInterpreter::new();
    let events = press_for(&mut interp, SHORT_PRESS_TICKS);
    assert_eq!(
        events,
        vec![
            ButtonEvent::Threshold(Press::Short),
            ButtonEvent::Release(Some(Press::Short)),
        ]
    );
}

#[test]
fn long_press_supersedes_short() {
    let mut interp = ButtonInterpreter::new();
    let events = press_for(&mut interp, LONG_PRESS_TICKS);
    assert_eq!(
        events,
        vec![
            ButtonEvent::Threshold(Press::Short),
            ButtonEvent::Threshold(Press::Long),
            ButtonEvent::Release(Some(Press::Long)),
        ]
    );
}

#[test]
fn very_long_press_supersedes_long() {
    let mut interp = ButtonInterpreter::new();
    let events = press_for(&mut interp, VERY_LONG_PRESS_TICKS);
    assert_eq!(events.last(), Some(&ButtonEvent::Release(Some(Press::VeryLong))));
}

#[test]
fn hold_past_very_long_stays_very_long() {
    let mut interp = ButtonInterpreter::new();
    let events = press_for(&mut interp, VERY_LONG_PRESS_TICKS + 500);
    let thresholds = events
        .iter()
        .filter(|e| matches!(e, ButtonEvent::Threshold(_)))
        .count();
    // Each threshold fires exactly once no matter how long the hold
    assert_eq!(thresholds, 3);
    assert_eq!(events.last(), Some(&ButtonEvent::Release(Some(Press::VeryLong))));
}

#[test]
fn classification_fires_once_per_press() {
    let mut interp = ButtonInterpreter::new();
    press_for(&mut interp, LONG_PRESS_TICKS);
    // A following short press must not replay the stale long arm
    let events = press_for(&mut interp, SHORT_PRESS_TICKS);
    assert_eq!(
        events,
        vec![
            ButtonEvent::Threshold(Press::Short),
            ButtonEvent::Release(Some(Press::Short)),
        ]
    );
}

// =============================================================================
// Debounce Tests
// =============================================================================

#[test]
fn release_needs_four_clean_samples() {
    let mut interp = ButtonInterpreter::new();
    for _ in 0..SHORT_PRESS_TICKS {
        interp.tick(true);
    }
    // Three inactive samples are still inside the debounce window
    assert_eq!(interp.tick(false), None);
    assert_eq!(interp.tick(false), None);
    assert_eq!(interp.tick(false), None);
    assert_eq!(interp.tick(false), Some(ButtonEvent::Release(Some(Press::Short))));
}

#[test]
fn bounce_on_release_does_not_split_press() {
    let mut interp = ButtonInterpreter::new();
    let mut events = Vec::new();
    for _ in 0..SHORT_PRESS_TICKS {
        events.extend(interp.tick(true));
    }
    // Contact bounce: alternating samples inside the debounce window
    events.extend(interp.tick(false));
    events.extend(interp.tick(true));
    events.extend(interp.tick(false));
    // Now a clean release
    for _ in 0..4 {
        events.extend(interp.tick(false));
    }
    let releases = events
        .iter()
        .filter(|e| matches!(e, ButtonEvent::Release(_)))
        .count();
    assert_eq!(releases, 1);
}

#[test]
fn hold_continues_through_bounce() {
    let mut interp = ButtonInterpreter::new();
    let mut events = Vec::new();
    // Bouncy but mostly-held input still accumulates hold time
    for i in 0..(LONG_PRESS_TICKS + 20) {
        let sample = i % 8 != 0;
        events.extend(interp.tick(sample));
    }
    for _ in 0..4 {
        events.extend(interp.tick(false));
    }
    assert_eq!(events.last(), Some(&ButtonEvent::Release(Some(Press::Long))));
}
