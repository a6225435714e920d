//! Test modules for the queue system
//!
//! Suites are split by functional area, mirroring the public surface:
//! core operations, registry behaviour, concurrency, capacity/memory,
//! lifecycle, timeouts, and edge cases.

mod core_functionality;
mod memory;
