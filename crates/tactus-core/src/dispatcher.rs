//! Ordered, paced delivery of gesture events to the device sink.
//!
//! A sequence is checked against a scratch copy of the pointer table before
//! anything is sent, so a refused step never leaves a pointer half-down.
//! Once sending starts, a sink failure releases every pointer and surfaces
//! as [`TouchError::SinkUnavailable`].

use crate::error::TouchError;
use crate::event::GestureEvent;
use crate::pointer::PointerStateTable;
use crate::sink::{DeviceSink, Pacer, ThreadPacer};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Serializes gesture events for one session onto the device sink.
#[derive(Debug)]
pub struct EventDispatcher<S, P = ThreadPacer> {
    sink: S,
    pacer: P,
    dispatched: u64,
}

impl<S: DeviceSink> EventDispatcher<S> {
    /// Dispatcher pacing in real time.
    pub const fn new(sink: S) -> Self {
        Self::with_pacer(sink, ThreadPacer)
    }
}

impl<S: DeviceSink, P: Pacer> EventDispatcher<S, P> {
    /// Dispatcher with a custom pacer.
    pub const fn with_pacer(sink: S, pacer: P) -> Self {
        Self {
            sink,
            pacer,
            dispatched: 0,
        }
    }

    /// Validate, then admit and send each event in order.
    ///
    /// # Errors
    ///
    /// State-machine errors leave `table` unchanged and send nothing. Sink
    /// errors release every pointer before returning.
    pub fn dispatch(
        &mut self,
        table: &mut PointerStateTable,
        events: &[GestureEvent],
    ) -> Result<(), TouchError> {
        Self::validate(table, events)?;
        debug!(events = events.len(), "dispatching gesture");

        let mut previous = Duration::ZERO;
        for event in events {
            self.pacer.pause(event.offset.saturating_sub(previous));
            previous = event.offset;

            table.admit(event)?;
            trace!(%event, "send");
            if let Err(err) = self.sink.send(event) {
                warn!(error = %err, %event, "sink failed mid-gesture");
                self.cancel_all(table);
                return Err(err.into());
            }
            self.dispatched += 1;
        }
        Ok(())
    }

    /// Dry-run a sequence against a copy of the table.
    ///
    /// # Errors
    ///
    /// The first refusal of the state machine.
    pub fn validate(table: &PointerStateTable, events: &[GestureEvent]) -> Result<(), TouchError> {
        let mut scratch = table.clone();
        events.iter().try_for_each(|event| scratch.admit(event))
    }

    /// Release every active pointer without pacing. Send failures are
    /// logged and skipped. Returns the number of pointers released.
    pub fn cancel_all(&mut self, table: &mut PointerStateTable) -> usize {
        let ups = table.cancel_all();
        for up in &ups {
            match self.sink.send(up) {
                Ok(()) => self.dispatched += 1,
                Err(err) => warn!(error = %err, pointer = %up.pointer_id, "release not delivered"),
            }
        }
        if !ups.is_empty() {
            debug!(released = ups.len(), "cancelled active pointers");
        }
        ups.len()
    }

    /// Events delivered since construction.
    pub const fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Access the sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Access the pacer.
    pub const fn pacer(&self) -> &P {
        &self.pacer
    }
}
