//! Type definitions for the queue system
//!
//! Capacity attributes applied per queue, and the statistic snapshots used
//! for monitoring. None of these participate in the enqueue/dequeue hot path
//! beyond a cheap bounds check.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What `enqueue` does when a bounded queue is at capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Fail fast with `QueueFull` / `MemoryLimitExceeded`
    #[default]
    Reject,
    /// Wait on the not-full condition until room is available
    Block,
}

/// Per-queue capacity policy, fixed at creation.
///
/// The default is unbounded in both dimensions, matching queues created
/// before any limits configuration has been applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueAttributes {
    /// Maximum number of elements held at once (`None` = unbounded)
    pub max_elements: Option<usize>,
    /// Maximum total payload bytes held at once (`None` = unbounded)
    pub max_bytes: Option<usize>,
    /// Producer behaviour when a bound would be exceeded
    pub overflow: OverflowPolicy,
}

impl QueueAttributes {
    /// Unbounded attributes; equivalent to `Default::default()`.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Bound by element count with the given overflow policy.
    pub fn bounded(max_elements: usize, overflow: OverflowPolicy) -> Self {
        Self {
            max_elements: Some(max_elements),
            max_bytes: None,
            overflow,
        }
    }
}

/// Point-in-time snapshot of one queue, taken under a single lock
/// acquisition so the fields are mutually consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueStats {
    /// Number of elements currently held
    pub elements: usize,
    /// Sum of the held elements' payload byte lengths
    pub bytes: usize,
    /// Age of the head (oldest) element, `None` when empty
    pub oldest_age: Option<Duration>,
    /// Age of the tail (youngest) element, `None` when empty
    pub youngest_age: Option<Duration>,
}

/// Aggregate totals across every queue in a registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryStats {
    /// Number of live queues
    pub queues: usize,
    /// Total elements across all queues
    pub total_elements: usize,
    /// Total payload bytes across all queues
    pub total_bytes: usize,
}
