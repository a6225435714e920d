//! postbox — a thread-safe registry of named FIFO queues.
//!
//! See [`queue`] for the queue system itself and [`core`] for shared
//! infrastructure (logging, time, lock hygiene).

pub mod core;
pub mod queue;
