//! Integration scenarios for Tactus touch sessions.

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tactus::{
    total_displacement, Brightness, Coordinates, ElementBounds, EventKind, FlickDirection,
    FlickGesture, PointerId, PointerState, ScreenPoint, ScrollGesture, SinkError, TimingConfig,
    TouchConfig, TouchError, TouchScreen, Viewport,
};
use tactus_test::{GestureHarness, RecordingSink, StaticLocator, VirtualPacer};

// =============================================================================
// Multi-touch
// =============================================================================

#[test]
fn test_two_finger_sequence() {
    let mut h = GestureHarness::new();
    h.touch_down(1, 10, 10).assert_ok();
    h.touch_down(2, 50, 50).assert_ok();
    h.touch_move(1, 15, 15).assert_ok();
    h.touch_up(1, 15, 15).assert_ok();
    h.touch_up(2, 50, 50).assert_ok();
    h.assert_idle().assert_kinds(&[
        EventKind::Down,
        EventKind::Down,
        EventKind::Move,
        EventKind::Up,
        EventKind::Up,
    ]);

    h.touch_up(1, 15, 15)
        .assert_error(&TouchError::PointerNotActive {
            id: PointerId::new(1),
        })
        .assert_event_count(5);
}

#[test]
fn test_double_down_on_primary() {
    let mut h = GestureHarness::new();
    h.touch_down(0, 0, 0).assert_ok();
    h.touch_down(0, 0, 0)
        .assert_error(&TouchError::PointerAlreadyActive {
            id: PointerId::PRIMARY,
        })
        .assert_event_count(1)
        .assert_state(0, PointerState::Down);
}

#[test]
fn test_pointer_states_through_lifecycle() {
    let mut h = GestureHarness::new();
    h.assert_state(3, PointerState::Idle);
    h.touch_down(3, 100, 100);
    h.assert_state(3, PointerState::Down);
    h.touch_move(3, 120, 100);
    h.assert_state(3, PointerState::Moved).assert_active(&[3]);
    h.touch_up(3, 120, 100);
    h.assert_state(3, PointerState::Idle).assert_idle();
}

#[test]
fn test_gesture_while_primary_held_is_refused_whole() {
    let mut h = GestureHarness::new();
    h.touch_down(0, 200, 200).assert_ok();
    h.tap(ScreenPoint::new(300, 300))
        .assert_error(&TouchError::PointerAlreadyActive {
            id: PointerId::PRIMARY,
        })
        .assert_event_count(1);
}

// =============================================================================
// Cancel
// =============================================================================

#[test]
fn test_cancel_releases_all_and_is_idempotent() {
    let mut h = GestureHarness::new();
    h.touch_down(2, 10, 10).touch_down(1, 20, 20).touch_down(0, 30, 30);
    h.assert_active(&[0, 1, 2]);

    h.cancel().assert_idle();
    let after_first = h.events();
    let released: Vec<u32> = after_first[3..].iter().map(|e| e.pointer_id.0).collect();
    assert_eq!(released, vec![0, 1, 2]);
    assert!(after_first[3..].iter().all(|e| e.kind == EventKind::Up));

    h.cancel().assert_idle().assert_event_count(6);
}

#[test]
fn test_cancel_does_not_pace() {
    let mut h = GestureHarness::new();
    h.touch_down(1, 10, 10);
    h.pacer().reset();
    h.cancel();
    assert_eq!(h.pacer().elapsed(), Duration::ZERO);
}

// =============================================================================
// Taps and presses
// =============================================================================

#[test]
fn test_single_tap_round_trips_to_idle() {
    let mut h = GestureHarness::new();
    h.tap(ScreenPoint::new(500, 500))
        .assert_ok()
        .assert_kinds(&[EventKind::Down, EventKind::Up])
        .assert_idle()
        .assert_elapsed_at_least(Duration::from_millis(40));
}

#[test]
fn test_double_tap_pairs_and_gaps() {
    let mut h = GestureHarness::new();
    h.double_tap(ScreenPoint::new(500, 500))
        .assert_ok()
        .assert_kinds(&[EventKind::Down, EventKind::Up, EventKind::Down, EventKind::Up])
        .assert_idle();

    let events = h.events();
    let timing = TimingConfig::default();
    let gap = events[2].offset - events[1].offset;
    assert!(gap < timing.long_press_threshold());
    assert!(events[1].offset < timing.long_press_threshold());
    assert!(timing.long_press_threshold() < timing.long_press_hold());
}

#[test]
fn test_long_press_holds_without_moving() {
    let mut h = GestureHarness::new();
    h.long_press(ScreenPoint::new(400, 400))
        .assert_ok()
        .assert_kinds(&[EventKind::Down, EventKind::Up]);
    let events = h.events();
    assert!(events[1].offset >= TimingConfig::default().long_press_threshold());
    assert_eq!(events[0].point, events[1].point);
}

// =============================================================================
// Scroll and flick
// =============================================================================

#[test]
fn test_anchored_scroll_from_element() {
    let mut h = GestureHarness::new().with_element("list", ElementBounds::new(0, 400, 1080, 1000));
    h.scroll_from(Coordinates::element("list"), 0, -300)
        .assert_ok()
        .assert_idle()
        .assert_last_point(540, 600);

    let events = h.events();
    let step = TimingConfig::default().max_step_px as i32;
    for pair in events.windows(2) {
        let d = pair[1].point - pair[0].point;
        assert!(d.dx.abs() <= step && d.dy.abs() <= step);
    }
}

#[test]
fn test_relative_scroll_continues_held_pointer() {
    let mut h = GestureHarness::new();
    h.touch_down(0, 540, 1500);
    h.scroll_by(0, -200).assert_ok().assert_state(0, PointerState::Moved);
    h.touch_up(0, 540, 1300).assert_ok().assert_idle();

    let kinds: Vec<EventKind> = h.events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds.first(), Some(&EventKind::Down));
    assert_eq!(kinds.last(), Some(&EventKind::Up));
    assert!(kinds[1..kinds.len() - 1].iter().all(|k| *k == EventKind::Move));
}

#[test]
fn test_scroll_leaving_viewport_sends_nothing() {
    let mut h = GestureHarness::new();
    h.scroll_by(0, 5000)
        .assert_error_where(|e| matches!(e, TouchError::OutOfViewport { .. }))
        .assert_event_count(0);
}

#[test]
fn test_extreme_offsets_rejected_without_panic() {
    let mut h = GestureHarness::new();
    h.scroll_by(i32::MAX, 0)
        .assert_error(&TouchError::OutOfViewport {
            point: ScreenPoint::new(i32::MAX, 960),
            viewport: Viewport::default(),
        })
        .assert_event_count(0);
    h.scroll_from(ScreenPoint::new(10, 10), 0, i32::MIN)
        .assert_error_where(|e| matches!(e, TouchError::OutOfViewport { .. }));
    h.flick_from(ScreenPoint::new(10, 10), i32::MIN, 0, 100)
        .assert_error_where(|e| matches!(e, TouchError::OutOfViewport { .. }))
        .assert_event_count(0);

    h.tap(ScreenPoint::new(10, 10)).assert_ok().assert_idle();
    assert!(!h.screen().is_invalidated());
}

#[test]
fn test_velocity_flick_continues_held_pointer() {
    let mut h = GestureHarness::new();
    h.touch_down(0, 540, 1500).assert_ok();
    h.flick_velocity(0, -1000)
        .assert_ok()
        .assert_state(0, PointerState::Moved)
        .assert_active(&[0])
        .assert_last_point(540, 1200);

    let events = h.events();
    assert_eq!(events[0].kind, EventKind::Down);
    assert!(events.len() > 2);
    assert!(events[1..].iter().all(|e| e.kind == EventKind::Move));

    h.touch_up(0, 540, 1200).assert_ok().assert_idle();
}

#[test]
fn test_flick_from_element() {
    let mut h = GestureHarness::new().with_element("card", ElementBounds::new(440, 1400, 200, 200));
    h.flick_from(Coordinates::element("card"), 0, -600, 3000)
        .assert_ok()
        .assert_idle()
        .assert_last_point(540, 900);
    let events = h.events();
    assert_eq!(events[0].kind, EventKind::Down);
    assert_eq!(events[0].point, ScreenPoint::new(540, 1500));

    h.locator().remove("card");
    h.flick_from(Coordinates::element("card"), 0, -600, 3000)
        .assert_error_where(|e| matches!(e, TouchError::UnresolvableTarget { .. }))
        .assert_event_count(events.len());
    assert!(!h.screen().is_invalidated());
}

#[test]
fn test_flick_displacement_monotonic_in_speed() {
    let travel = |speed: i32| {
        let mut h = GestureHarness::new();
        h.flick_velocity(0, speed).assert_ok().assert_idle();
        total_displacement(&h.events()).dy
    };
    let slow = travel(500);
    let fast = travel(2000);
    assert!(slow > 0);
    assert!(fast > slow);
}

#[test]
fn test_flick_release_is_fastest() {
    let mut h = GestureHarness::new();
    h.flick_from(ScreenPoint::new(540, 1800), 0, -1000, 4000)
        .assert_ok();
    let events = h.events();
    let moves: Vec<_> = events.iter().filter(|e| e.kind == EventKind::Move).collect();
    let n = moves.len();
    let last_step = (moves[n - 1].point - moves[n - 2].point).dy.abs();
    let first_step = (moves[1].point - moves[0].point).dy.abs();
    assert!(last_step > first_step);
    assert_eq!(events.last().map(|e| e.point), Some(ScreenPoint::new(540, 800)));
}

#[test]
fn test_directional_flick() {
    let mut h = GestureHarness::new();
    h.flick_towards(
        ScreenPoint::new(540, 960),
        FlickDirection::Right,
        300,
        Duration::from_millis(200),
    )
    .assert_ok()
    .assert_last_point(840, 960)
    .assert_idle();
    assert_eq!(h.events().last().map(|e| e.offset), Some(Duration::from_millis(200)));
}

#[test]
fn test_gesture_enums_through_screen() {
    let h = GestureHarness::new();
    let screen = h.screen();
    screen
        .scroll(&ScrollGesture::Relative {
            offset: tactus::Offset::new(50, 0),
        })
        .unwrap();
    screen
        .flick(&FlickGesture::Directional {
            origin: ScreenPoint::new(100, 100),
            direction: FlickDirection::DownRight,
            distance: 100,
            duration: Duration::from_millis(100),
        })
        .unwrap();
    assert!(screen.active_pointers().is_empty());
}

// =============================================================================
// Element resolution
// =============================================================================

#[test]
fn test_element_follows_layout_changes() {
    let mut h = GestureHarness::new().with_element("btn", ElementBounds::new(10, 10, 20, 20));
    h.tap(Coordinates::element("btn")).assert_last_point(20, 20);
    h.locator().move_to("btn", 500, 500);
    h.tap(Coordinates::element("btn")).assert_last_point(510, 510);
}

#[test]
fn test_vanished_and_hidden_elements() {
    let mut h = GestureHarness::new().with_element("hidden", ElementBounds::new(10, 10, 0, 20));
    h.tap(Coordinates::element("hidden"))
        .assert_error_where(|e| matches!(e, TouchError::UnresolvableTarget { .. }));
    h.tap(Coordinates::element("gone"))
        .assert_error_where(|e| matches!(e, TouchError::UnresolvableTarget { .. }))
        .assert_event_count(0);
    assert!(!h.screen().is_invalidated());
}

// =============================================================================
// Sink failure
// =============================================================================

#[test]
fn test_sink_failure_mid_gesture_invalidates() {
    let mut h = GestureHarness::new();
    h.sink().fail_once_at(3);
    h.scroll_by(0, 100)
        .assert_error(&TouchError::SinkUnavailable(SinkError::NotReady))
        .assert_idle()
        .assert_invalidated()
        .assert_kinds(&[EventKind::Down, EventKind::Move, EventKind::Move, EventKind::Up]);

    h.tap(ScreenPoint::new(1, 1))
        .assert_error(&TouchError::SessionInvalidated)
        .assert_event_count(4);
    h.cancel().assert_ok();
}

#[test]
fn test_disconnected_sink_fails_brightness() {
    let h = GestureHarness::new();
    h.sink().disconnect();
    let err = h.screen().set_brightness(0.5).unwrap_err();
    assert_eq!(err, TouchError::SinkUnavailable(SinkError::Disconnected));
    assert!(h.screen().is_invalidated());
    assert_eq!(h.screen().brightness(), Err(TouchError::SessionInvalidated));
}

// =============================================================================
// Brightness
// =============================================================================

#[test]
fn test_brightness_clamping() {
    let h = GestureHarness::new();
    let screen = h.screen();
    assert_eq!(screen.set_brightness(-0.5).unwrap().value(), 0.0);
    assert_eq!(screen.set_brightness(1.5).unwrap().value(), 1.0);
    assert_eq!(screen.set_brightness(0.3).unwrap().value(), 0.3);
    assert_eq!(screen.brightness().unwrap().value(), 0.3);
    assert_eq!(h.sink().brightness_requests(), vec![0.0, 1.0, 0.3]);
}

#[test]
fn test_brightness_screen_off() {
    let h = GestureHarness::new();
    h.sink().turn_screen_off();
    assert_eq!(h.screen().brightness().unwrap(), Brightness::OFF);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_from_toml_drives_timing() {
    let config = TouchConfig::from_toml(
        r#"
        anchor = "TopLeft"

        [viewport]
        width = 720
        height = 1280

        [timing]
        long_press_threshold_ms = 800
        long_press_hold_ms = 1200
        "#,
    )
    .unwrap();
    assert_eq!(config.viewport, Viewport::new(720, 1280));

    let mut h = GestureHarness::with_config(config)
        .with_element("icon", ElementBounds::new(100, 100, 50, 50));
    h.tap(Coordinates::element("icon")).assert_last_point(100, 100);
    h.long_press(ScreenPoint::new(10, 10))
        .assert_ok()
        .assert_elapsed_at_least(Duration::from_millis(1200));
    h.touch_down(0, 800, 10)
        .assert_error_where(|e| matches!(e, TouchError::OutOfViewport { .. }));
}

#[test]
fn test_invalid_config_rejected() {
    let result = TouchScreen::with_pacer(
        RecordingSink::new(),
        StaticLocator::new(),
        VirtualPacer::new(),
        TouchConfig::default().with_timing(TimingConfig {
            max_step_px: 0,
            ..TimingConfig::default()
        }),
    );
    assert!(result.is_err());
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_taps_never_interleave() {
    let sink = RecordingSink::new();
    let screen = Arc::new(
        TouchScreen::with_pacer(
            sink.clone(),
            StaticLocator::new(),
            VirtualPacer::new(),
            TouchConfig::default(),
        )
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let screen = Arc::clone(&screen);
            thread::spawn(move || {
                for _ in 0..10 {
                    screen.single_tap(&Coordinates::point(100 + i, 100)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let kinds = sink.kinds();
    assert_eq!(kinds.len(), 80);
    for pair in kinds.chunks(2) {
        assert_eq!(pair, [EventKind::Down, EventKind::Up]);
    }
    assert_eq!(screen.dispatched(), 80);
}
