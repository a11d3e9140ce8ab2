//! Core types for the Tactus touch-gesture engine.
//!
//! This crate provides the pieces a touch session is built from:
//! - Geometry: [`ScreenPoint`], [`Offset`], [`Viewport`], [`ElementBounds`]
//! - Events: [`PointerId`], [`GestureEvent`]
//! - The touch state machine: [`PointerStateTable`]
//! - Gesture expansion: [`GestureKinematics`], [`FlickDirection`]
//! - Target resolution: [`Coordinates`], [`CoordinateResolver`]
//! - Delivery: [`DeviceSink`], [`Pacer`], [`EventDispatcher`]
//! - Configuration: [`TimingConfig`], [`TouchConfig`]

mod config;
mod dispatcher;
mod error;
mod event;
mod geometry;
pub mod kinematics;
mod pointer;
mod resolver;
mod sink;

pub use config::{TimingConfig, TouchConfig};
pub use dispatcher::EventDispatcher;
pub use error::{ConfigError, SinkError, TouchError};
pub use event::{EventKind, GestureEvent, PointerId};
pub use geometry::{ElementBounds, Offset, ScreenPoint, Viewport};
pub use kinematics::{total_displacement, FlickDirection, GestureKinematics, ParseDirectionError};
pub use pointer::{PointerState, PointerStateTable};
pub use resolver::{Anchor, CoordinateResolver, Coordinates, ElementHandle, ElementLocator, NoElements};
pub use sink::{DeviceSink, Pacer, ThreadPacer};
