//! Named Multi-Queue Component
//!
//! A thread-safe registry of named FIFO queues with blocking delivery,
//! byte-level memory accounting, and configurable capacity limits.
//!
//! # Overview
//!
//! Subsystems communicate by enqueueing byte payloads onto queues they
//! address by name. Key properties:
//!
//! - **Named queues on demand**: queues are created on first use and found
//!   by exact name afterwards; creation is idempotent
//! - **Strict FIFO**: delivery order is insertion order; per-element
//!   priorities ride along as metadata
//! - **Blocking delivery**: consumers wait on a condition variable, not a
//!   poll loop; timed and non-blocking variants exist
//! - **Memory accounting**: every queue tracks its payload byte total
//! - **Backpressure**: optional element/byte bounds with reject-or-block
//!   overflow behaviour
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │ Subsystem A  │      │ Subsystem B  │      │ Subsystem C  │
//! └──────┬───────┘      └──────┬───────┘      └──────┬───────┘
//!        │ create/find         │ create/find         │ create/find
//!        ▼                     ▼                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  QueueRegistry (256 buckets)                │
//! │   hash(name) ──▶ [ chain ] ──▶ Arc<NamedQueue> ──▶ ...      │
//! └─────────────────────────────────────────────────────────────┘
//!        │ Arc<NamedQueue>                   │ Arc<NamedQueue>
//!        ▼                                   ▼
//! ┌───────────────────────┐        ┌───────────────────────┐
//! │ NamedQueue "jobs"     │        │ NamedQueue "telemetry"│
//! │ mutex + not_empty/    │        │ mutex + not_empty/    │
//! │ not_full condvars     │        │ not_full condvars     │
//! │ ┌───┬───┬───┬───┐     │        │ ┌───┬───┐             │
//! │ │ 1 │ 2 │ 3 │ 4 │ ──▶ │ FIFO   │ │ 1 │ 2 │ ──▶         │
//! │ └───┴───┴───┴───┘     │        │ └───┴───┘             │
//! └───────────────────────┘        └───────────────────────┘
//! ```
//!
//! The registry lock guards only the table structure; once a subsystem holds
//! its `Arc<NamedQueue>`, enqueue/dequeue traffic contends solely on that
//! queue's own mutex.
//!
//! # Example Usage
//!
//! ```rust
//! use postbox::queue::{QueueRegistry, QueueResult};
//!
//! fn example() -> QueueResult<()> {
//!     let registry = QueueRegistry::new();
//!
//!     let jobs = registry.create("jobs")?;
//!     jobs.enqueue(b"compile", 1)?;
//!     jobs.enqueue(b"link", 9)?;
//!
//!     // FIFO regardless of priority
//!     let first = jobs.dequeue()?;
//!     assert_eq!(first.data, b"compile");
//!
//!     registry.shutdown();
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

mod error;
mod limits;
mod message;
#[allow(clippy::module_inception)]
mod queue;
mod registry;
mod types;

pub mod api;

pub use error::{QueueError, QueueResult};
pub use limits::QueueLimits;
pub use message::Element;
pub use queue::NamedQueue;
pub use registry::QueueRegistry;
pub use types::{OverflowPolicy, QueueAttributes, QueueStats, RegistryStats};

#[cfg(test)]
mod tests;
