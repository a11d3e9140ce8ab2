//! Device-facing collaborators: the event sink and the pacing clock.

use crate::error::SinkError;
use crate::event::GestureEvent;
use std::time::Duration;

/// Channel that delivers primitive events and brightness requests to the
/// device. Events must be applied in submission order.
pub trait DeviceSink {
    /// Deliver one event.
    fn send(&mut self, event: &GestureEvent) -> Result<(), SinkError>;

    /// Current screen brightness, `None` when the screen is off.
    fn brightness(&mut self) -> Result<Option<f32>, SinkError>;

    /// Request a screen brightness in `[0.0, 1.0]`.
    fn set_brightness(&mut self, value: f32) -> Result<(), SinkError>;
}

impl<S: DeviceSink + ?Sized> DeviceSink for Box<S> {
    fn send(&mut self, event: &GestureEvent) -> Result<(), SinkError> {
        (**self).send(event)
    }

    fn brightness(&mut self) -> Result<Option<f32>, SinkError> {
        (**self).brightness()
    }

    fn set_brightness(&mut self, value: f32) -> Result<(), SinkError> {
        (**self).set_brightness(value)
    }
}

/// Waits between consecutive events of a gesture.
pub trait Pacer {
    /// Block for `duration`.
    fn pause(&mut self, duration: Duration);
}

/// Real-time pacing on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
