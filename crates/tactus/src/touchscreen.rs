//! The touch-screen facade.
//!
//! One [`TouchScreen`] owns one device session. Every operation takes the
//! session lock once, so concurrent callers are serialized and their
//! gestures never interleave on the wire.

use crate::brightness::Brightness;
use crate::gesture::{FlickGesture, ScrollGesture};
use parking_lot::Mutex;
use std::fmt;
use std::time::Duration;
use tactus_core::{
    ConfigError, CoordinateResolver, Coordinates, DeviceSink, ElementLocator, EventDispatcher,
    FlickDirection, GestureEvent, GestureKinematics, Offset, Pacer, PointerId, PointerState,
    PointerStateTable, ScreenPoint, SinkError, ThreadPacer, TouchConfig, TouchError,
};
use tracing::{debug, error, info};

struct Session<S, P> {
    table: PointerStateTable,
    dispatcher: EventDispatcher<S, P>,
    invalidated: bool,
}

impl<S: DeviceSink, P: Pacer> Session<S, P> {
    fn ensure_live(&self) -> Result<(), TouchError> {
        if self.invalidated {
            Err(TouchError::SessionInvalidated)
        } else {
            Ok(())
        }
    }

    /// Release everything and refuse further gestures.
    fn invalidate(&mut self, op: &'static str, err: &SinkError) {
        let released = self.dispatcher.cancel_all(&mut self.table);
        self.invalidated = true;
        error!(op, error = %err, released, "device sink failed, session invalidated");
    }
}

/// Touch input on one device, in screen pixels.
///
/// Composite gestures are expanded into primitive Down/Move/Up events, checked
/// against the pointer state machine, then paced onto the [`DeviceSink`].
/// A failed check sends nothing. A sink failure releases every pointer and
/// invalidates the session: later gestures fail with
/// [`TouchError::SessionInvalidated`], while [`TouchScreen::cancel`] keeps
/// working.
pub struct TouchScreen<S, L, P = ThreadPacer> {
    session: Mutex<Session<S, P>>,
    resolver: CoordinateResolver<L>,
    kinematics: GestureKinematics,
    config: TouchConfig,
}

impl<S: DeviceSink, L: ElementLocator> TouchScreen<S, L> {
    /// Open a session pacing in real time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the config does not validate.
    pub fn new(sink: S, locator: L, config: TouchConfig) -> Result<Self, ConfigError> {
        Self::with_pacer(sink, locator, ThreadPacer, config)
    }
}

impl<S: DeviceSink, L: ElementLocator, P: Pacer> TouchScreen<S, L, P> {
    /// Open a session with a custom pacer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the config does not validate.
    pub fn with_pacer(sink: S, locator: L, pacer: P, config: TouchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(viewport = %config.viewport, "touch session opened");
        Ok(Self {
            session: Mutex::new(Session {
                table: PointerStateTable::new(),
                dispatcher: EventDispatcher::with_pacer(sink, pacer),
                invalidated: false,
            }),
            resolver: CoordinateResolver::new(locator, config.viewport, config.anchor),
            kinematics: GestureKinematics::new(config.timing.clone()),
            config,
        })
    }

    /// Build a sequence under the session lock and dispatch it.
    fn perform<F>(&self, op: &'static str, build: F) -> Result<(), TouchError>
    where
        F: FnOnce(&PointerStateTable) -> Result<Vec<GestureEvent>, TouchError>,
    {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session.ensure_live()?;

        let events = build(&session.table)?;
        match session.dispatcher.dispatch(&mut session.table, &events) {
            Ok(()) => {
                debug!(op, events = events.len(), "gesture complete");
                Ok(())
            }
            Err(TouchError::SinkUnavailable(err)) => {
                session.invalidated = true;
                error!(op, error = %err, "device sink failed, session invalidated");
                Err(TouchError::SinkUnavailable(err))
            }
            Err(err) => {
                debug!(op, error = %err, "gesture refused");
                Err(err)
            }
        }
    }

    // Primitives

    /// Tap once at a target.
    ///
    /// # Errors
    ///
    /// Resolution, state-machine, and sink errors.
    pub fn single_tap(&self, target: &Coordinates) -> Result<(), TouchError> {
        self.perform("single_tap", |_| {
            let point = self.resolver.resolve(target)?;
            Ok(self.kinematics.single_tap(point))
        })
    }

    /// Press the primary pointer at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerAlreadyActive`] if the primary pointer is down.
    pub fn down(&self, x: i32, y: i32) -> Result<(), TouchError> {
        self.multi_touch_down(x, y, PointerId::PRIMARY)
    }

    /// Press pointer `id` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerAlreadyActive`] if `id` is already down.
    pub fn multi_touch_down(&self, x: i32, y: i32, id: PointerId) -> Result<(), TouchError> {
        self.perform("down", |_| {
            let point = self.resolver.check(ScreenPoint::new(x, y))?;
            Ok(vec![GestureEvent::down(id, point)])
        })
    }

    /// Release the primary pointer at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerNotActive`] if the primary pointer is idle.
    pub fn up(&self, x: i32, y: i32) -> Result<(), TouchError> {
        self.multi_touch_up(x, y, PointerId::PRIMARY)
    }

    /// Release pointer `id` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerNotActive`] if `id` is idle.
    pub fn multi_touch_up(&self, x: i32, y: i32, id: PointerId) -> Result<(), TouchError> {
        self.perform("up", |_| {
            let point = self.resolver.check(ScreenPoint::new(x, y))?;
            Ok(vec![GestureEvent::up(id, point)])
        })
    }

    /// Move the primary pointer to `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerNotActive`] if the primary pointer is idle.
    pub fn move_to(&self, x: i32, y: i32) -> Result<(), TouchError> {
        self.multi_touch_move(x, y, PointerId::PRIMARY)
    }

    /// Move pointer `id` to `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`TouchError::PointerNotActive`] if `id` is idle.
    pub fn multi_touch_move(&self, x: i32, y: i32, id: PointerId) -> Result<(), TouchError> {
        self.perform("move", |_| {
            let point = self.resolver.check(ScreenPoint::new(x, y))?;
            Ok(vec![GestureEvent::moved(id, point)])
        })
    }

    /// Release every active pointer. Idempotent, and still works after the
    /// session has been invalidated.
    pub fn cancel(&self) {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        let released = session.dispatcher.cancel_all(&mut session.table);
        debug!(released, "cancel");
    }

    // Composites

    /// Drag across the screen.
    ///
    /// # Errors
    ///
    /// Resolution errors, [`TouchError::OutOfViewport`] when the drag would
    /// leave the screen, state-machine and sink errors.
    pub fn scroll(&self, gesture: &ScrollGesture) -> Result<(), TouchError> {
        self.perform(gesture.name(), |table| match gesture {
            ScrollGesture::Anchored { from, offset } => {
                let start = self.resolver.resolve(from)?;
                self.resolver.offset_target(start, *offset)?;
                Ok(self.kinematics.scroll(start, *offset))
            }
            ScrollGesture::Relative { offset } => match table.position(PointerId::PRIMARY) {
                Some(current) => {
                    self.resolver.offset_target(current, *offset)?;
                    Ok(self.kinematics.scroll_moves(current, *offset))
                }
                None => {
                    let center = self.resolver.viewport().center();
                    self.resolver.offset_target(center, *offset)?;
                    Ok(self.kinematics.scroll(center, *offset))
                }
            },
        })
    }

    /// Drag from a target by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// See [`Self::scroll`].
    pub fn scroll_from(&self, from: impl Into<Coordinates>, dx: i32, dy: i32) -> Result<(), TouchError> {
        self.scroll(&ScrollGesture::Anchored {
            from: from.into(),
            offset: Offset::new(dx, dy),
        })
    }

    /// Drag by `(dx, dy)` from the primary pointer or the viewport center.
    ///
    /// # Errors
    ///
    /// See [`Self::scroll`].
    pub fn scroll_by(&self, dx: i32, dy: i32) -> Result<(), TouchError> {
        self.scroll(&ScrollGesture::Relative {
            offset: Offset::new(dx, dy),
        })
    }

    /// Tap twice at a target.
    ///
    /// # Errors
    ///
    /// Resolution, state-machine, and sink errors.
    pub fn double_tap(&self, target: &Coordinates) -> Result<(), TouchError> {
        self.perform("double_tap", |_| {
            let point = self.resolver.resolve(target)?;
            Ok(self.kinematics.double_tap(point))
        })
    }

    /// Press and hold at a target past the long-press threshold.
    ///
    /// # Errors
    ///
    /// Resolution, state-machine, and sink errors.
    pub fn long_press(&self, target: &Coordinates) -> Result<(), TouchError> {
        self.perform("long_press", |_| {
            let point = self.resolver.resolve(target)?;
            Ok(self.kinematics.long_press(point))
        })
    }

    /// Fast swipe that the device reads as a fling.
    ///
    /// # Errors
    ///
    /// Resolution errors, [`TouchError::OutOfViewport`] when the flick would
    /// leave the screen, state-machine and sink errors.
    pub fn flick(&self, gesture: &FlickGesture) -> Result<(), TouchError> {
        self.perform(gesture.name(), |table| match gesture {
            FlickGesture::Velocity { x_speed, y_speed } => {
                let offset = self.kinematics.flick_displacement(*x_speed, *y_speed);
                let duration = self.kinematics.config().flick_duration();
                match table.position(PointerId::PRIMARY) {
                    Some(current) => {
                        self.resolver.offset_target(current, offset)?;
                        Ok(self.kinematics.flick_moves(current, offset, duration))
                    }
                    None => {
                        let center = self.resolver.viewport().center();
                        self.resolver.offset_target(center, offset)?;
                        Ok(self.kinematics.flick(center, offset, duration))
                    }
                }
            }
            FlickGesture::Anchored { from, offset, speed } => {
                let start = self.resolver.resolve(from)?;
                self.resolver.offset_target(start, *offset)?;
                Ok(self.kinematics.flick_with_speed(start, *offset, *speed))
            }
            FlickGesture::Directional {
                origin,
                direction,
                distance,
                duration,
            } => {
                let start = self.resolver.check(*origin)?;
                self.resolver.offset_target(start, direction.offset(*distance))?;
                Ok(self
                    .kinematics
                    .directional_flick(start, *direction, *distance, *duration))
            }
        })
    }

    /// Flick at `(x_speed, y_speed)` pixels/second.
    ///
    /// # Errors
    ///
    /// See [`Self::flick`].
    pub fn flick_velocity(&self, x_speed: i32, y_speed: i32) -> Result<(), TouchError> {
        self.flick(&FlickGesture::Velocity { x_speed, y_speed })
    }

    /// Flick from a target by `(dx, dy)` at `speed` pixels/second.
    ///
    /// # Errors
    ///
    /// See [`Self::flick`].
    pub fn flick_from(
        &self,
        from: impl Into<Coordinates>,
        dx: i32,
        dy: i32,
        speed: i32,
    ) -> Result<(), TouchError> {
        self.flick(&FlickGesture::Anchored {
            from: from.into(),
            offset: Offset::new(dx, dy),
            speed,
        })
    }

    /// Flick `distance` pixels in `direction` over `duration`.
    ///
    /// # Errors
    ///
    /// See [`Self::flick`].
    pub fn flick_towards(
        &self,
        origin: ScreenPoint,
        direction: FlickDirection,
        distance: u32,
        duration: Duration,
    ) -> Result<(), TouchError> {
        self.flick(&FlickGesture::Directional {
            origin,
            direction,
            distance,
            duration,
        })
    }

    // Brightness

    /// Current screen brightness; [`Brightness::OFF`] when the screen is off.
    ///
    /// # Errors
    ///
    /// Sink errors, which invalidate the session.
    pub fn brightness(&self) -> Result<Brightness, TouchError> {
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session.ensure_live()?;
        match session.dispatcher.sink_mut().brightness() {
            Ok(reported) => Ok(reported.map_or(Brightness::OFF, Brightness::new)),
            Err(err) => {
                session.invalidate("brightness", &err);
                Err(err.into())
            }
        }
    }

    /// Set screen brightness, clamped to `[0.0, 1.0]`. Returns the level
    /// actually requested.
    ///
    /// # Errors
    ///
    /// Sink errors, which invalidate the session.
    pub fn set_brightness(&self, value: f32) -> Result<Brightness, TouchError> {
        let level = Brightness::new(value);
        let mut guard = self.session.lock();
        let session = &mut *guard;
        session.ensure_live()?;
        match session.dispatcher.sink_mut().set_brightness(level.value()) {
            Ok(()) => {
                debug!(requested = value, %level, "brightness set");
                Ok(level)
            }
            Err(err) => {
                session.invalidate("set_brightness", &err);
                Err(err.into())
            }
        }
    }

    // Queries

    /// State of one pointer.
    pub fn pointer_state(&self, id: PointerId) -> PointerState {
        self.session.lock().table.state(id)
    }

    /// Active pointers in ascending id order.
    pub fn active_pointers(&self) -> Vec<PointerId> {
        self.session.lock().table.active_ids()
    }

    /// Whether a sink failure has ended this session.
    pub fn is_invalidated(&self) -> bool {
        self.session.lock().invalidated
    }

    /// Events delivered to the sink so far.
    pub fn dispatched(&self) -> u64 {
        self.session.lock().dispatcher.dispatched()
    }

    /// The session configuration.
    pub const fn config(&self) -> &TouchConfig {
        &self.config
    }

}

impl<S, L, P> fmt::Debug for TouchScreen<S, L, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TouchScreen")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
