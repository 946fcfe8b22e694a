//! Shared test utilities used across fibforest crates.
//!
//! [`tracing::RecordingLayer`] captures spans and events so tests can assert
//! instrumentation, and [`ci::property_test_profile`] reads the property-test
//! case budget from the environment.

pub mod ci;
pub mod tracing;
