//! Action sink implementations.
//!
//! | Module    | When                       | Effect                         |
//! |-----------|----------------------------|--------------------------------|
//! | `native`  | `native` feature enabled   | real input via enigo + arboard |
//! | `logging` | default build              | logs every action              |
//! | `mock`    | always compiled            | records actions for tests      |
//!
//! `mock` is not behind `#[cfg(test)]` so integration tests under `tests/`
//! can use it too.

pub mod logging;
pub mod mock;

#[cfg(feature = "native")]
pub mod native;

pub use logging::LoggingSink;
pub use mock::{RecordingSink, SinkAction};

#[cfg(feature = "native")]
pub use native::EnigoSink;
