//! Test doubles and fixtures.
//!
//! Exposed as a normal module (not `#[cfg(test)]`) so integration
//! tests and downstream consumers can drive the engine without real
//! indexers.

pub mod fixtures;
mod mock_source;

pub use mock_source::MockSource;
