//! timeslot-rs: scroll-synchronized day-timeline engine.
//!
//! This crate provides the geometry and synchronization core of a
//! horizontally-scrollable 24-hour track populated with time-slot event
//! blocks, each backed by a clipped (and optionally blurred) slice of a
//! shared background snapshot that follows the parent scroll position.
//! Host-toolkit mounting lives behind a thin feature-gated adapter.

pub mod api;
pub mod core;
pub mod error;
pub mod snapshot;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ScrollHost, TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
