//! Support library for the fibforest CLI binary.
//!
//! Exposes the command pipeline, the branch network script interpreter, and
//! logging setup so doctests and integration tests can drive them without
//! forking a subprocess.

pub mod cli;
pub mod logging;
pub mod network;
