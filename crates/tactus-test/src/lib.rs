#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::new_without_default)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::manual_assert)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unwrap_used)]
//! Test doubles and a gesture harness for Tactus.
//!
//! # Example
//!
//! ```
//! use tactus::{ElementBounds, EventKind};
//! use tactus_test::GestureHarness;
//!
//! let mut harness = GestureHarness::new()
//!     .with_element("send", ElementBounds::new(900, 1800, 100, 60));
//!
//! harness
//!     .tap(tactus::Coordinates::element("send"))
//!     .assert_ok()
//!     .assert_kinds(&[EventKind::Down, EventKind::Up])
//!     .assert_idle();
//! ```

mod harness;
mod locator;
mod pacer;
mod sink;

pub use harness::{GestureHarness, TestScreen};
pub use locator::StaticLocator;
pub use pacer::VirtualPacer;
pub use sink::RecordingSink;
