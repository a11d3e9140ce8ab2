//! Expansion of composite gestures into timed primitive events.
//!
//! Every function here is a pure function of its inputs and the
//! [`TimingConfig`], so the same call always yields the same sequence.
//! Composite gestures run on [`PointerId::PRIMARY`] and always pair their
//! Down with an Up; the `*_moves` variants emit only the Move events, for
//! continuing a contact the caller already holds.

use crate::config::TimingConfig;
use crate::event::{EventKind, GestureEvent, PointerId};
use crate::geometry::{Offset, ScreenPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Compass direction of a directional flick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlickDirection {
    /// Towards the top edge
    Up,
    /// Towards the bottom edge
    Down,
    /// Towards the left edge
    Left,
    /// Towards the right edge
    Right,
    /// Towards the top-left corner
    UpLeft,
    /// Towards the top-right corner
    UpRight,
    /// Towards the bottom-left corner
    DownLeft,
    /// Towards the bottom-right corner
    DownRight,
}

impl FlickDirection {
    /// All eight directions.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Up,
            Self::Down,
            Self::Left,
            Self::Right,
            Self::UpLeft,
            Self::UpRight,
            Self::DownLeft,
            Self::DownRight,
        ]
    }

    /// Unit vector in screen space (y grows downwards).
    #[must_use]
    pub const fn unit_vector(&self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::UpLeft => (-DIAGONAL, -DIAGONAL),
            Self::UpRight => (DIAGONAL, -DIAGONAL),
            Self::DownLeft => (-DIAGONAL, DIAGONAL),
            Self::DownRight => (DIAGONAL, DIAGONAL),
        }
    }

    /// Displacement of `distance` pixels in this direction.
    #[must_use]
    pub fn offset(&self, distance: u32) -> Offset {
        let (ux, uy) = self.unit_vector();
        let d = distance as f32;
        Offset::new((ux * d).round() as i32, (uy * d).round() as i32)
    }

    /// Protocol spelling, e.g. `DOWN_LEFT`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::UpLeft => "UP_LEFT",
            Self::UpRight => "UP_RIGHT",
            Self::DownLeft => "DOWN_LEFT",
            Self::DownRight => "DOWN_RIGHT",
        }
    }
}

impl fmt::Display for FlickDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown flick direction name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown flick direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for FlickDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Builds primitive event sequences for composite gestures.
#[derive(Debug, Clone, Default)]
pub struct GestureKinematics {
    config: TimingConfig,
}

impl GestureKinematics {
    /// Create kinematics with explicit timing constants.
    #[must_use]
    pub const fn new(config: TimingConfig) -> Self {
        Self { config }
    }

    /// The timing constants in use.
    #[must_use]
    pub const fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// `[Down, Up]` one settle delay apart.
    #[must_use]
    pub fn single_tap(&self, point: ScreenPoint) -> Vec<GestureEvent> {
        self.press(point, self.config.settle())
    }

    /// Two taps separated by the inter-tap gap.
    #[must_use]
    pub fn double_tap(&self, point: ScreenPoint) -> Vec<GestureEvent> {
        let second = self.config.settle().saturating_add(self.config.double_tap_gap());
        let mut events = self.single_tap(point);
        events.extend(
            self.single_tap(point)
                .into_iter()
                .map(|e| e.at(second.saturating_add(e.offset))),
        );
        events
    }

    /// `[Down, Up]` held past the long-press threshold, no Moves.
    #[must_use]
    pub fn long_press(&self, point: ScreenPoint) -> Vec<GestureEvent> {
        self.press(point, self.config.long_press_hold())
    }

    /// Number of interpolation steps needed so no step moves further than
    /// `max_step_px` on either axis. Zero for a zero offset.
    #[must_use]
    pub fn step_count(&self, offset: Offset) -> u32 {
        let step = self.config.max_step_px.max(1);
        offset.max_axis().div_ceil(step)
    }

    /// Drag from `from` by `offset`: Down, evenly paced Moves, Up.
    ///
    /// Total duration grows linearly with the distance travelled.
    #[must_use]
    pub fn scroll(&self, from: ScreenPoint, offset: Offset) -> Vec<GestureEvent> {
        if offset.is_zero() {
            return self.single_tap(from);
        }
        let steps = self.step_count(offset);
        let step = self.config.scroll_step();
        let mut events = vec![GestureEvent::down(PointerId::PRIMARY, from)];
        events.extend(self.scroll_moves(from, offset));
        events.push(GestureEvent::up(PointerId::PRIMARY, from + offset).at(step.saturating_mul(steps.saturating_add(1))));
        events
    }

    /// The Move events of [`Self::scroll`] alone.
    #[must_use]
    pub fn scroll_moves(&self, from: ScreenPoint, offset: Offset) -> Vec<GestureEvent> {
        let steps = self.step_count(offset);
        let step = self.config.scroll_step();
        (1..=steps)
            .map(|k| {
                let t = k as f32 / steps as f32;
                GestureEvent::moved(PointerId::PRIMARY, from.lerp_offset(offset, t)).at(step.saturating_mul(k))
            })
            .collect()
    }

    /// Displacement covered by a flick at the given speeds (pixels/second)
    /// over the configured duration budget.
    #[must_use]
    pub fn flick_displacement(&self, x_speed: i32, y_speed: i32) -> Offset {
        let secs = self.config.flick_duration().as_secs_f32();
        Offset::new(
            (x_speed as f32 * secs).round() as i32,
            (y_speed as f32 * secs).round() as i32,
        )
    }

    /// Flick from `from` at the given speeds, over the duration budget.
    #[must_use]
    pub fn flick_velocity(&self, from: ScreenPoint, x_speed: i32, y_speed: i32) -> Vec<GestureEvent> {
        let offset = self.flick_displacement(x_speed, y_speed);
        self.flick(from, offset, self.config.flick_duration())
    }

    /// Flick from `from` by `offset` at `speed` pixels/second. A non-positive
    /// speed falls back to the duration budget.
    #[must_use]
    pub fn flick_with_speed(&self, from: ScreenPoint, offset: Offset, speed: i32) -> Vec<GestureEvent> {
        self.flick(from, offset, self.flick_duration_for(offset, speed))
    }

    /// Duration a flick of `offset` takes at `speed`.
    #[must_use]
    pub fn flick_duration_for(&self, offset: Offset, speed: i32) -> Duration {
        if speed > 0 {
            Duration::from_secs_f32(offset.length() / speed as f32)
        } else {
            self.config.flick_duration()
        }
    }

    /// Release-weighted flick: the last two Moves carry
    /// `flick_release_fraction` of the displacement, so the final samples
    /// are the fastest.
    #[must_use]
    pub fn flick(&self, from: ScreenPoint, offset: Offset, duration: Duration) -> Vec<GestureEvent> {
        if offset.is_zero() {
            return self.single_tap(from);
        }
        let moves = self.flick_moves(from, offset, duration);
        let mut events = Vec::with_capacity(moves.len() + 2);
        events.push(GestureEvent::down(PointerId::PRIMARY, from));
        events.extend(moves);
        events.push(GestureEvent::up(PointerId::PRIMARY, from + offset).at(duration));
        events
    }

    /// The Move events of [`Self::flick`] alone.
    #[must_use]
    pub fn flick_moves(&self, from: ScreenPoint, offset: Offset, duration: Duration) -> Vec<GestureEvent> {
        if offset.is_zero() {
            return Vec::new();
        }
        let fractions = self.release_profile(offset);
        let count = fractions.len() as u32;
        fractions
            .iter()
            .zip(1u32..)
            .map(|(&t, k)| {
                GestureEvent::moved(PointerId::PRIMARY, from.lerp_offset(offset, t))
                    .at(fraction_of(duration, k, count))
            })
            .collect()
    }

    /// Cumulative displacement fractions of a flick's Moves.
    fn release_profile(&self, offset: Offset) -> Vec<f32> {
        let release = self.config.flick_release_fraction;
        let lead = 1.0 - release;
        let lead_px = offset.max_axis() as f32 * lead;
        let lead_steps = (lead_px / self.config.max_step_px.max(1) as f32).ceil().max(1.0) as u32;

        let mut fractions: Vec<f32> = (1..=lead_steps)
            .map(|k| lead * k as f32 / lead_steps as f32)
            .collect();
        fractions.push(lead + release / 2.0);
        fractions.push(1.0);
        fractions
    }

    /// Flick `distance` pixels in a compass direction, with scroll-style
    /// interpolation spread evenly over `duration`.
    #[must_use]
    pub fn directional_flick(
        &self,
        origin: ScreenPoint,
        direction: FlickDirection,
        distance: u32,
        duration: Duration,
    ) -> Vec<GestureEvent> {
        let offset = direction.offset(distance);
        let steps = self.step_count(offset);
        if steps == 0 {
            return self.press(origin, duration);
        }
        let mut events = vec![GestureEvent::down(PointerId::PRIMARY, origin)];
        events.extend((1..=steps).map(|k| {
            let t = k as f32 / steps as f32;
            GestureEvent::moved(PointerId::PRIMARY, origin.lerp_offset(offset, t))
                .at(fraction_of(duration, k, steps))
        }));
        events.push(GestureEvent::up(PointerId::PRIMARY, origin + offset).at(duration));
        events
    }

    fn press(&self, point: ScreenPoint, hold: Duration) -> Vec<GestureEvent> {
        vec![
            GestureEvent::down(PointerId::PRIMARY, point),
            GestureEvent::new(PointerId::PRIMARY, EventKind::Up, point, hold),
        ]
    }
}

/// `k/n` of `duration`, falling back to a coarser split when `duration * k`
/// would overflow.
fn fraction_of(duration: Duration, k: u32, n: u32) -> Duration {
    let n = n.max(1);
    duration
        .checked_mul(k)
        .map_or_else(|| (duration / n).saturating_mul(k), |d| d / n)
}

/// Distance between the first and last point of a sequence.
#[must_use]
pub fn total_displacement(events: &[GestureEvent]) -> Offset {
    match (events.first(), events.last()) {
        (Some(first), Some(last)) => last.point - first.point,
        _ => Offset::ZERO,
    }
}
