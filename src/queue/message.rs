//! Element type stored in named queues
//!
//! An element owns a copy of the producer's bytes together with the metadata
//! recorded at enqueue time. Ownership is exclusive: the queue holds the
//! element until a dequeue moves it out to the consumer by value.

use std::time::SystemTime;

/// One message unit stored inside a [`NamedQueue`](crate::queue::NamedQueue).
///
/// The payload is a private copy of whatever the producer passed to
/// `enqueue`; producers keep their own buffer and consumers receive this one.
/// `priority` is recorded per element but does not affect service order —
/// delivery is strictly FIFO.
#[derive(Debug, Clone)]
pub struct Element {
    /// Owned copy of the producer's bytes
    pub data: Vec<u8>,
    /// Producer-supplied priority, carried as metadata
    pub priority: i32,
    /// Wall-clock time the element entered the queue
    pub enqueued_at: SystemTime,
}

impl Element {
    pub(crate) fn new(data: &[u8], priority: i32, enqueued_at: SystemTime) -> Self {
        Self {
            data: data.to_vec(),
            priority,
            enqueued_at,
        }
    }

    /// Byte length of the payload
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
