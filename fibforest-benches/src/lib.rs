//! Benchmark support crate for fibforest.
//!
//! Provides seeded synthetic graphs and key streams plus the parameter types
//! used by the Criterion benchmarks for the Fibonacci heap and the minimum
//! spanning forest builder.

pub mod error;
pub mod params;
pub mod source;
