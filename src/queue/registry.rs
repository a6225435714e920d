//! QueueRegistry - central lookup table for named queues
//!
//! The registry owns a fixed-size hash table of queue chains, keyed by a
//! DJB2 hash of the queue name. One registry mutex guards the table
//! structure only; element traffic on an individual queue goes through that
//! queue's own lock, so steady-state producers and consumers never contend
//! here.
//!
//! There is deliberately no process-wide registry instance. Construct a
//! `QueueRegistry` where the application wires its subsystems together and
//! pass it by reference; tests get full isolation for free.

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::limits::QueueLimits;
use crate::queue::queue::NamedQueue;
use crate::queue::types::{QueueAttributes, RegistryStats};
use std::sync::{Arc, Mutex};

/// Number of hash buckets; name hashes are folded modulo this.
const BUCKET_COUNT: usize = 256;

/// Interior table state, guarded by the registry mutex.
struct RegistryState {
    buckets: Vec<Vec<Arc<NamedQueue>>>,
    queue_count: usize,
    limits: QueueLimits,
    closed: bool,
}

/// Registry of all named queues, with idempotent creation.
///
/// Queues are created on first use and looked up by exact name afterwards.
/// Creation and lookup happen in a single critical section on the registry
/// lock, so two racing creators always observe the same queue.
///
/// # Example
/// ```
/// use postbox::queue::QueueRegistry;
///
/// let registry = QueueRegistry::new();
/// let jobs = registry.create("jobs").unwrap();
/// jobs.enqueue(b"build", 0).unwrap();
///
/// let same = registry.create("jobs").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&jobs, &same));
/// ```
pub struct QueueRegistry {
    state: Mutex<RegistryState>,
}

impl QueueRegistry {
    /// Create an empty registry with unbounded default attributes.
    ///
    /// Configuration is a separate step: see
    /// [`apply_limits`](QueueRegistry::apply_limits). Construction itself
    /// consults nothing and cannot fail.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                buckets: vec![Vec::new(); BUCKET_COUNT],
                queue_count: 0,
                limits: QueueLimits::default(),
                closed: false,
            }),
        }
    }

    /// Install default and per-queue capacity attributes for queues created
    /// from now on. Existing queues keep the attributes they were created
    /// with.
    pub fn apply_limits(&self, limits: &QueueLimits) -> QueueResult<()> {
        let mut state = self.lock_state()?;
        if state.closed {
            return Err(QueueError::RegistryClosed);
        }
        log::debug!(
            "queue limits applied (default {:?}, {} per-queue overrides)",
            limits.default,
            limits.queues.len()
        );
        state.limits = limits.clone();
        Ok(())
    }

    /// Look up a queue by exact name. Empty names are rejected as `None`
    /// without touching the table.
    pub fn find(&self, name: &str) -> Option<Arc<NamedQueue>> {
        if name.is_empty() {
            return None;
        }
        let state = self.state.lock().ok()?;
        if state.closed {
            return None;
        }
        state.buckets[bucket_of(name)]
            .iter()
            .find(|queue| queue.name() == name)
            .cloned()
    }

    /// [`find`](QueueRegistry::find) with the requesting subsystem recorded
    /// in trace logs for lookup attribution.
    pub fn find_for(&self, name: &str, subsystem: &str) -> Option<Arc<NamedQueue>> {
        let found = self.find(name);
        log::trace!(
            "queue lookup '{}' for subsystem '{}': {}",
            name,
            subsystem,
            if found.is_some() { "hit" } else { "miss" }
        );
        found
    }

    /// Get or create the queue `name` using the configured default
    /// attributes (or the per-queue override installed via
    /// [`apply_limits`](QueueRegistry::apply_limits)).
    ///
    /// Creation is idempotent: if the queue already exists, the existing
    /// handle is returned and no new queue is made.
    pub fn create(&self, name: &str) -> QueueResult<Arc<NamedQueue>> {
        self.create_inner(name, None, None)
    }

    /// Get or create `name` with explicit attributes. Attributes are applied
    /// only on first creation; an existing queue keeps its own.
    pub fn create_with(&self, name: &str, attrs: QueueAttributes) -> QueueResult<Arc<NamedQueue>> {
        self.create_inner(name, Some(attrs), None)
    }

    /// [`create`](QueueRegistry::create) with the creating subsystem recorded
    /// in debug logs.
    pub fn create_for(&self, name: &str, subsystem: &str) -> QueueResult<Arc<NamedQueue>> {
        self.create_inner(name, None, Some(subsystem))
    }

    fn create_inner(
        &self,
        name: &str,
        attrs: Option<QueueAttributes>,
        subsystem: Option<&str>,
    ) -> QueueResult<Arc<NamedQueue>> {
        if name.is_empty() {
            return Err(QueueError::EmptyName);
        }
        let mut state = self.lock_state()?;
        if state.closed {
            return Err(QueueError::RegistryClosed);
        }

        let bucket = bucket_of(name);
        if let Some(existing) = state.buckets[bucket]
            .iter()
            .find(|queue| queue.name() == name)
        {
            return Ok(Arc::clone(existing));
        }

        // Not found: construct and insert within the same critical section,
        // so a racing creator cannot produce a duplicate. The queue is fully
        // initialized before it becomes reachable.
        let attrs = attrs.unwrap_or_else(|| state.limits.attributes_for(name));
        let queue = Arc::new(NamedQueue::new(name, attrs));
        state.buckets[bucket].push(Arc::clone(&queue));
        state.queue_count += 1;
        log::debug!(
            "queue '{}' created in bucket {}{}",
            name,
            bucket,
            subsystem
                .map(|s| format!(" for subsystem '{}'", s))
                .unwrap_or_default()
        );
        Ok(queue)
    }

    /// Unlink `name` from the table and close it, waking all blocked
    /// producers and consumers.
    ///
    /// Handles held elsewhere stay valid but observe the closed state;
    /// the queue's memory is released when the last handle drops, so a
    /// dangling table entry cannot exist.
    pub fn remove(&self, name: &str) -> QueueResult<Arc<NamedQueue>> {
        if name.is_empty() {
            return Err(QueueError::EmptyName);
        }
        let queue = {
            let mut state = self.lock_state()?;
            if state.closed {
                return Err(QueueError::RegistryClosed);
            }
            let chain = &mut state.buckets[bucket_of(name)];
            let position = chain.iter().position(|queue| queue.name() == name);
            match position {
                Some(index) => {
                    let queue = chain.swap_remove(index);
                    state.queue_count -= 1;
                    queue
                }
                None => {
                    return Err(QueueError::QueueNotFound {
                        name: name.to_string(),
                    })
                }
            }
        };
        queue.close();
        log::debug!("queue '{}' removed from registry", name);
        Ok(queue)
    }

    /// Shut the registry down: mark it closed so new operations fail
    /// cleanly, then close and drain every queue in the table.
    ///
    /// Undelivered elements are discarded. Blocked consumers wake with
    /// [`QueueError::QueueClosed`]. Idempotent: repeated calls are no-ops.
    pub fn shutdown(&self) {
        let drained: Vec<Arc<NamedQueue>> = {
            // Shutdown proceeds even through a poisoned registry lock; a
            // half-torn-down table must still release its waiters.
            let mut state = match self.state.lock() {
                Ok(state) => state,
                Err(poisoned) => poisoned.into_inner(),
            };
            if state.closed {
                return;
            }
            state.closed = true;
            state.queue_count = 0;
            state
                .buckets
                .iter_mut()
                .flat_map(|chain| std::mem::take(chain))
                .collect()
        };

        for queue in &drained {
            queue.close();
            let _ = queue.clear();
        }
        log::info!("queue registry shut down ({} queues closed)", drained.len());
    }

    /// Number of live queues. Reports 0 on a poisoned lock.
    pub fn queue_count(&self) -> usize {
        self.state.lock().map_or(0, |s| s.queue_count)
    }

    /// Names of all live queues, in no particular order.
    pub fn queue_names(&self) -> Vec<String> {
        match self.state.lock() {
            Ok(state) => state
                .buckets
                .iter()
                .flatten()
                .map(|queue| queue.name().to_string())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Aggregate element and byte totals across every queue.
    ///
    /// Takes the registry lock for the walk and each queue's lock briefly
    /// for its counters; queue operations never take the registry lock, so
    /// the acquisition order cannot invert.
    pub fn memory_stats(&self) -> RegistryStats {
        match self.state.lock() {
            Ok(state) => {
                let mut stats = RegistryStats {
                    queues: state.queue_count,
                    ..RegistryStats::default()
                };
                for queue in state.buckets.iter().flatten() {
                    stats.total_elements += queue.len();
                    stats.total_bytes += queue.memory_used();
                }
                stats
            }
            Err(_) => RegistryStats::default(),
        }
    }

    fn lock_state(&self) -> QueueResult<std::sync::MutexGuard<'_, RegistryState>> {
        crate::core::sync::handle_mutex_poison(self.state.lock(), |message| {
            QueueError::LockPoisoned { message }
        })
    }
}

impl Default for QueueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// DJB2 hash of the queue name, folded into the bucket range.
fn bucket_of(name: &str) -> usize {
    let mut hash: u32 = 5381;
    for &byte in name.as_bytes() {
        hash = hash.wrapping_shl(5).wrapping_add(hash).wrapping_add(u32::from(byte));
    }
    hash as usize % BUCKET_COUNT
}
