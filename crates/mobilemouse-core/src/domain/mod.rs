//! Domain values for the injection engine.
//!
//! Nothing in here touches the OS: monitor rectangles arrive as plain values
//! from whatever enumerates them, and configuration arrives already parsed.
//! That keeps the clamping and scaling rules testable on any machine.

/// Monitor rectangles, virtual-desktop bounds and pointer clamping.
pub mod geometry;

/// Immutable tuning values read by the engine.
pub mod config;
