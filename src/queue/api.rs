//! Public API for the queue system
//!
//! This module provides the complete public API for the named multi-queue
//! system. External modules should import from here rather than directly
//! from internal modules. See the module documentation for architecture
//! details and usage examples.

// Core queue components
pub use crate::queue::queue::NamedQueue;
pub use crate::queue::registry::QueueRegistry;

// Element type delivered to consumers
pub use crate::queue::message::Element;

// Capacity attributes and statistics
pub use crate::queue::types::{OverflowPolicy, QueueAttributes, QueueStats, RegistryStats};

// Limits configuration
pub use crate::queue::limits::QueueLimits;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};
