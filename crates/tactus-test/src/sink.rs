//! In-memory device sink.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tactus::{DeviceSink, EventKind, GestureEvent, PointerId, SinkError};

#[derive(Debug, Default, Serialize)]
struct Recording {
    events: Vec<GestureEvent>,
    brightness: Option<f32>,
    brightness_requests: Vec<f32>,
    #[serde(skip)]
    fail_after: Option<usize>,
    #[serde(skip)]
    fail_once_at: Option<usize>,
    #[serde(skip)]
    disconnected: bool,
}

/// Sink that records every delivered event.
///
/// Clones share the same recording, so a test can keep one handle while the
/// touch screen owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingSink {
    /// Create an empty recording with the screen off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording that reports `level` as the current brightness.
    pub fn with_brightness(level: f32) -> Self {
        let sink = Self::new();
        sink.inner.lock().brightness = Some(level);
        sink
    }

    /// Every delivered event, in order.
    pub fn events(&self) -> Vec<GestureEvent> {
        self.inner.lock().events.clone()
    }

    /// Kinds of every delivered event, in order.
    pub fn kinds(&self) -> Vec<EventKind> {
        self.inner.lock().events.iter().map(|e| e.kind).collect()
    }

    /// Events delivered for one pointer.
    pub fn events_for(&self, id: PointerId) -> Vec<GestureEvent> {
        self.inner
            .lock()
            .events
            .iter()
            .filter(|e| e.pointer_id == id)
            .copied()
            .collect()
    }

    /// Number of delivered events.
    pub fn len(&self) -> usize {
        self.inner.lock().events.len()
    }

    /// Check if nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget delivered events.
    pub fn clear(&self) {
        self.inner.lock().events.clear();
    }

    /// Refuse every send once `n` events have been delivered.
    pub fn fail_after(&self, n: usize) {
        self.inner.lock().fail_after = Some(n);
    }

    /// Refuse only the send attempted once `n` events have been delivered.
    pub fn fail_once_at(&self, n: usize) {
        self.inner.lock().fail_once_at = Some(n);
    }

    /// Refuse every request, events and brightness alike.
    pub fn disconnect(&self) {
        self.inner.lock().disconnected = true;
    }

    /// Clear every planned failure.
    pub fn reconnect(&self) {
        let mut rec = self.inner.lock();
        rec.fail_after = None;
        rec.fail_once_at = None;
        rec.disconnected = false;
    }

    /// Simulate the screen turning off.
    pub fn turn_screen_off(&self) {
        self.inner.lock().brightness = None;
    }

    /// Brightness levels requested so far.
    pub fn brightness_requests(&self) -> Vec<f32> {
        self.inner.lock().brightness_requests.clone()
    }

    /// Recording as pretty JSON, for failure output and golden files.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&*self.inner.lock()).unwrap_or_default()
    }
}

impl DeviceSink for RecordingSink {
    fn send(&mut self, event: &GestureEvent) -> Result<(), SinkError> {
        let mut rec = self.inner.lock();
        if rec.disconnected {
            return Err(SinkError::Disconnected);
        }
        if rec.fail_after.is_some_and(|n| rec.events.len() >= n) {
            return Err(SinkError::Rejected(format!("refused {event}")));
        }
        if rec.fail_once_at == Some(rec.events.len()) {
            rec.fail_once_at = None;
            return Err(SinkError::NotReady);
        }
        rec.events.push(*event);
        Ok(())
    }

    fn brightness(&mut self) -> Result<Option<f32>, SinkError> {
        let rec = self.inner.lock();
        if rec.disconnected {
            return Err(SinkError::Disconnected);
        }
        Ok(rec.brightness)
    }

    fn set_brightness(&mut self, value: f32) -> Result<(), SinkError> {
        let mut rec = self.inner.lock();
        if rec.disconnected {
            return Err(SinkError::Disconnected);
        }
        rec.brightness_requests.push(value);
        rec.brightness = Some(value);
        Ok(())
    }
}
