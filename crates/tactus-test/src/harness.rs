//! Gesture harness: a touch screen wired to in-memory doubles.

use crate::locator::StaticLocator;
use crate::pacer::VirtualPacer;
use crate::sink::RecordingSink;
use std::time::Duration;
use tactus::{
    Coordinates, ElementBounds, EventKind, FlickDirection, GestureEvent, PointerId, PointerState,
    ScreenPoint, TouchConfig, TouchError, TouchScreen, Viewport,
};

/// Touch screen type driven by the harness.
pub type TestScreen = TouchScreen<RecordingSink, StaticLocator, VirtualPacer>;

/// Drives a [`TestScreen`] and checks what reached the device.
///
/// Actions never panic; the outcome of the latest one is kept for the
/// `assert_*` methods.
pub struct GestureHarness {
    screen: TestScreen,
    sink: RecordingSink,
    locator: StaticLocator,
    pacer: VirtualPacer,
    last: Result<(), TouchError>,
}

impl GestureHarness {
    /// Harness over a 1080x1920 screen with default timing.
    pub fn new() -> Self {
        Self::with_config(TouchConfig::for_viewport(Viewport::default()))
    }

    /// Harness with explicit config.
    ///
    /// # Panics
    ///
    /// Panics if the config does not validate.
    pub fn with_config(config: TouchConfig) -> Self {
        let sink = RecordingSink::new();
        let locator = StaticLocator::new();
        let pacer = VirtualPacer::new();
        let screen = TouchScreen::with_pacer(sink.clone(), locator.clone(), pacer.clone(), config)
            .unwrap_or_else(|e| panic!("invalid harness config: {e}"));
        Self {
            screen,
            sink,
            locator,
            pacer,
            last: Ok(()),
        }
    }

    /// Add an element the locator can find.
    #[must_use]
    pub fn with_element(self, id: &str, bounds: ElementBounds) -> Self {
        self.locator.insert(id, bounds);
        self
    }

    /// The screen under test.
    pub const fn screen(&self) -> &TestScreen {
        &self.screen
    }

    /// Handle on the recording sink.
    pub const fn sink(&self) -> &RecordingSink {
        &self.sink
    }

    /// Handle on the element table.
    pub const fn locator(&self) -> &StaticLocator {
        &self.locator
    }

    /// Handle on the virtual clock.
    pub const fn pacer(&self) -> &VirtualPacer {
        &self.pacer
    }

    /// Outcome of the latest action.
    pub const fn last_result(&self) -> &Result<(), TouchError> {
        &self.last
    }

    // === Actions ===

    /// Tap a target.
    pub fn tap(&mut self, target: impl Into<Coordinates>) -> &mut Self {
        self.last = self.screen.single_tap(&target.into());
        self
    }

    /// Double-tap a target.
    pub fn double_tap(&mut self, target: impl Into<Coordinates>) -> &mut Self {
        self.last = self.screen.double_tap(&target.into());
        self
    }

    /// Long-press a target.
    pub fn long_press(&mut self, target: impl Into<Coordinates>) -> &mut Self {
        self.last = self.screen.long_press(&target.into());
        self
    }

    /// Press pointer `id`.
    pub fn touch_down(&mut self, id: u32, x: i32, y: i32) -> &mut Self {
        self.last = self.screen.multi_touch_down(x, y, PointerId::new(id));
        self
    }

    /// Move pointer `id`.
    pub fn touch_move(&mut self, id: u32, x: i32, y: i32) -> &mut Self {
        self.last = self.screen.multi_touch_move(x, y, PointerId::new(id));
        self
    }

    /// Release pointer `id`.
    pub fn touch_up(&mut self, id: u32, x: i32, y: i32) -> &mut Self {
        self.last = self.screen.multi_touch_up(x, y, PointerId::new(id));
        self
    }

    /// Drag from a target.
    pub fn scroll_from(&mut self, from: impl Into<Coordinates>, dx: i32, dy: i32) -> &mut Self {
        self.last = self.screen.scroll_from(from, dx, dy);
        self
    }

    /// Drag relative to the primary pointer or the viewport center.
    pub fn scroll_by(&mut self, dx: i32, dy: i32) -> &mut Self {
        self.last = self.screen.scroll_by(dx, dy);
        self
    }

    /// Flick at the given speeds.
    pub fn flick_velocity(&mut self, x_speed: i32, y_speed: i32) -> &mut Self {
        self.last = self.screen.flick_velocity(x_speed, y_speed);
        self
    }

    /// Flick from a target at `speed`.
    pub fn flick_from(
        &mut self,
        from: impl Into<Coordinates>,
        dx: i32,
        dy: i32,
        speed: i32,
    ) -> &mut Self {
        self.last = self.screen.flick_from(from, dx, dy, speed);
        self
    }

    /// Flick in a compass direction.
    pub fn flick_towards(
        &mut self,
        origin: ScreenPoint,
        direction: FlickDirection,
        distance: u32,
        duration: Duration,
    ) -> &mut Self {
        self.last = self.screen.flick_towards(origin, direction, distance, duration);
        self
    }

    /// Release every pointer.
    pub fn cancel(&mut self) -> &mut Self {
        self.screen.cancel();
        self.last = Ok(());
        self
    }

    // === Queries ===

    /// Events delivered so far.
    pub fn events(&self) -> Vec<GestureEvent> {
        self.sink.events()
    }

    // === Assertions ===

    /// Assert the latest action succeeded.
    ///
    /// # Panics
    ///
    /// Panics if it failed.
    pub fn assert_ok(&self) -> &Self {
        if let Err(e) = &self.last {
            panic!("Expected success but got: {e}");
        }
        self
    }

    /// Assert the latest action failed with `expected`.
    ///
    /// # Panics
    ///
    /// Panics if it succeeded or failed differently.
    pub fn assert_error(&self, expected: &TouchError) -> &Self {
        match &self.last {
            Ok(()) => panic!("Expected error '{expected}' but the action succeeded"),
            Err(e) => assert_eq!(e, expected, "Expected error '{expected}' but got '{e}'"),
        }
        self
    }

    /// Assert the latest action failed with an error matching `pred`.
    ///
    /// # Panics
    ///
    /// Panics if it succeeded or `pred` rejects the error.
    pub fn assert_error_where(&self, pred: impl FnOnce(&TouchError) -> bool) -> &Self {
        match &self.last {
            Ok(()) => panic!("Expected an error but the action succeeded"),
            Err(e) => assert!(pred(e), "Unexpected error: {e}"),
        }
        self
    }

    /// Assert how many events reached the device.
    ///
    /// # Panics
    ///
    /// Panics if the count differs.
    pub fn assert_event_count(&self, expected: usize) -> &Self {
        let actual = self.sink.len();
        assert_eq!(
            actual,
            expected,
            "Expected {expected} events but found {actual}:\n{}",
            self.sink.to_json()
        );
        self
    }

    /// Assert the kinds of delivered events, in order.
    ///
    /// # Panics
    ///
    /// Panics if the kinds differ.
    pub fn assert_kinds(&self, expected: &[EventKind]) -> &Self {
        let actual = self.sink.kinds();
        assert_eq!(actual, expected, "Unexpected event kinds");
        self
    }

    /// Assert the set of active pointers.
    ///
    /// # Panics
    ///
    /// Panics if the active set differs.
    pub fn assert_active(&self, expected: &[u32]) -> &Self {
        let actual: Vec<u32> = self.screen.active_pointers().iter().map(|p| p.0).collect();
        assert_eq!(actual, expected, "Unexpected active pointers");
        self
    }

    /// Assert no pointer is active.
    ///
    /// # Panics
    ///
    /// Panics if any pointer is active.
    pub fn assert_idle(&self) -> &Self {
        self.assert_active(&[])
    }

    /// Assert the state of one pointer.
    ///
    /// # Panics
    ///
    /// Panics if the state differs.
    pub fn assert_state(&self, id: u32, expected: PointerState) -> &Self {
        let actual = self.screen.pointer_state(PointerId::new(id));
        assert_eq!(actual, expected, "Unexpected state for pointer #{id}");
        self
    }

    /// Assert where the last delivered event landed.
    ///
    /// # Panics
    ///
    /// Panics if nothing was delivered or the point differs.
    pub fn assert_last_point(&self, x: i32, y: i32) -> &Self {
        let events = self.sink.events();
        let last = events
            .last()
            .unwrap_or_else(|| panic!("Expected an event at ({x}, {y}) but none were sent"));
        assert_eq!(last.point, ScreenPoint::new(x, y), "Unexpected final point");
        self
    }

    /// Assert the session was invalidated by a sink failure.
    ///
    /// # Panics
    ///
    /// Panics if the session is still live.
    pub fn assert_invalidated(&self) -> &Self {
        assert!(self.screen.is_invalidated(), "Expected invalidated session");
        self
    }

    /// Assert at least `min` of virtual time has passed.
    ///
    /// # Panics
    ///
    /// Panics if less time has passed.
    pub fn assert_elapsed_at_least(&self, min: Duration) -> &Self {
        let elapsed = self.pacer.elapsed();
        assert!(
            elapsed >= min,
            "Expected at least {min:?} of virtual time but got {elapsed:?}"
        );
        self
    }
}

impl Default for GestureHarness {
    fn default() -> Self {
        Self::new()
    }
}
