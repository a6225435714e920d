//! NamedQueue implementation with blocking delivery
//!
//! This module provides the per-queue core:
//! - Strict FIFO service order (recorded priorities are metadata only)
//! - One mutex around the element chain, two condition variables
//!   (`not_empty` for consumers, `not_full` for blocked producers)
//! - Byte-level memory accounting alongside the element count
//! - Optional capacity bounds with reject or block overflow behaviour

use crate::core::sync::handle_mutex_poison;
use crate::core::time::{SystemTimeProvider, TimeProvider};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::message::Element;
use crate::queue::types::{OverflowPolicy, QueueAttributes, QueueStats};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

/// Interior state; every field is guarded by the queue mutex.
///
/// Invariant: `bytes_used` equals the sum of `elements[..].size()`, and both
/// are zero exactly when `elements` is empty.
#[derive(Debug, Default)]
struct QueueState {
    elements: VecDeque<Element>,
    bytes_used: usize,
    closed: bool,
}

enum Admission {
    Admit,
    Full(QueueError),
}

/// A named, mutex-protected FIFO of [`Element`]s.
///
/// Producers call [`enqueue`](NamedQueue::enqueue); consumers call
/// [`dequeue`](NamedQueue::dequeue) (blocking),
/// [`dequeue_timeout`](NamedQueue::dequeue_timeout), or
/// [`try_dequeue`](NamedQueue::try_dequeue). All element traffic goes through
/// this queue's own lock only — the registry lock is never involved.
///
/// Closing the queue (directly or via registry removal/shutdown) wakes every
/// blocked producer and consumer; consumers drain remaining elements before
/// observing [`QueueError::QueueClosed`].
pub struct NamedQueue {
    name: String,
    attrs: QueueAttributes,
    state: Mutex<QueueState>,
    not_empty: Condvar,
    not_full: Condvar,
    clock: Box<dyn TimeProvider>,
}

impl NamedQueue {
    /// Create a standalone queue with the given capacity attributes.
    ///
    /// Queues shared between subsystems are normally created through
    /// [`QueueRegistry::create`](crate::queue::QueueRegistry::create) so they
    /// are discoverable by name.
    pub fn new(name: impl Into<String>, attrs: QueueAttributes) -> Self {
        Self::with_clock(name, attrs, Box::new(SystemTimeProvider))
    }

    pub(crate) fn with_clock(
        name: impl Into<String>,
        attrs: QueueAttributes,
        clock: Box<dyn TimeProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            attrs,
            state: Mutex::new(QueueState::default()),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &QueueAttributes {
        &self.attrs
    }

    /// Append a copy of `data` at the tail.
    ///
    /// The bytes are copied before the lock is taken; the caller keeps its
    /// buffer. `priority` is recorded on the element but does not reorder
    /// delivery.
    ///
    /// On a bounded queue at capacity the behaviour depends on the queue's
    /// [`OverflowPolicy`]: `Reject` fails fast, `Block` waits on the not-full
    /// condition until a consumer makes room or the queue is closed.
    pub fn enqueue(&self, data: &[u8], priority: i32) -> QueueResult<()> {
        if data.is_empty() {
            return Err(QueueError::EmptyPayload);
        }
        // A payload larger than the byte bound can never fit; blocking for it
        // would wait forever.
        if let Some(max_bytes) = self.attrs.max_bytes {
            if data.len() > max_bytes {
                return Err(QueueError::MemoryLimitExceeded { max_bytes });
            }
        }

        let enqueued_at = self.clock.system_time();
        let mut state = self.lock_state()?;
        loop {
            if state.closed {
                return Err(self.closed_error());
            }
            match self.admission(&state, data.len()) {
                Admission::Admit => break,
                Admission::Full(err) => match self.attrs.overflow {
                    OverflowPolicy::Reject => return Err(err),
                    OverflowPolicy::Block => {
                        state = handle_mutex_poison(self.not_full.wait(state), |message| {
                            QueueError::LockPoisoned { message }
                        })?;
                    }
                },
            }
        }

        state.bytes_used += data.len();
        state
            .elements
            .push_back(Element::new(data, priority, enqueued_at));
        log::trace!(
            "enqueued {} bytes on '{}' ({} queued, {} bytes)",
            data.len(),
            self.name,
            state.elements.len(),
            state.bytes_used
        );
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove and return the head element, blocking while the queue is empty.
    ///
    /// The wait is a cooperative condition-variable wait, released by an
    /// enqueue or by the queue being closed. A closed queue drains its
    /// remaining elements first; once empty it fails with
    /// [`QueueError::QueueClosed`]. Ownership of the element's payload
    /// transfers to the caller.
    pub fn dequeue(&self) -> QueueResult<Element> {
        let mut state = self.lock_state()?;
        loop {
            if let Some(element) = state.elements.pop_front() {
                return Ok(self.account_removal(state, element));
            }
            if state.closed {
                return Err(self.closed_error());
            }
            state = handle_mutex_poison(self.not_empty.wait(state), |message| {
                QueueError::LockPoisoned { message }
            })?;
        }
    }

    /// Like [`dequeue`](NamedQueue::dequeue), but give up after `timeout`.
    ///
    /// Returns `Ok(Some(element))` on data, `Ok(None)` on timeout — a result
    /// distinct from both data and failure — and `Err` on a closed-and-empty
    /// queue or a poisoned lock.
    pub fn dequeue_timeout(&self, timeout: Duration) -> QueueResult<Option<Element>> {
        let state = self.lock_state()?;
        let (mut state, _wait) = handle_mutex_poison(
            self.not_empty
                .wait_timeout_while(state, timeout, |s| s.elements.is_empty() && !s.closed),
            |message| QueueError::LockPoisoned { message },
        )?;

        if let Some(element) = state.elements.pop_front() {
            return Ok(Some(self.account_removal(state, element)));
        }
        if state.closed {
            return Err(self.closed_error());
        }
        Ok(None)
    }

    /// Non-blocking probe: `Ok(None)` when the queue is currently empty.
    pub fn try_dequeue(&self) -> QueueResult<Option<Element>> {
        let mut state = self.lock_state()?;
        if let Some(element) = state.elements.pop_front() {
            return Ok(Some(self.account_removal(state, element)));
        }
        if state.closed {
            return Err(self.closed_error());
        }
        Ok(None)
    }

    /// Number of elements currently held. Reports 0 on a poisoned lock —
    /// monitoring never fails an operation.
    pub fn len(&self) -> usize {
        self.state.lock().map_or(0, |s| s.elements.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the held elements' payload byte lengths (struct overhead is
    /// not counted). Reports 0 on a poisoned lock.
    pub fn memory_used(&self) -> usize {
        self.state.lock().map_or(0, |s| s.bytes_used)
    }

    /// Age of the oldest (head) element; `None` when the queue is empty.
    /// A clock that moved backwards reports `Some(Duration::ZERO)`.
    pub fn oldest_age(&self) -> Option<Duration> {
        let state = self.state.lock().ok()?;
        state
            .elements
            .front()
            .map(|element| self.age_of(element))
    }

    /// Age of the youngest (tail) element; `None` when the queue is empty.
    pub fn youngest_age(&self) -> Option<Duration> {
        let state = self.state.lock().ok()?;
        state.elements.back().map(|element| self.age_of(element))
    }

    /// Consistent snapshot of count, bytes, and both ages.
    pub fn stats(&self) -> QueueStats {
        match self.state.lock() {
            Ok(state) => QueueStats {
                elements: state.elements.len(),
                bytes: state.bytes_used,
                oldest_age: state.elements.front().map(|e| self.age_of(e)),
                youngest_age: state.elements.back().map(|e| self.age_of(e)),
            },
            Err(_) => QueueStats {
                elements: 0,
                bytes: 0,
                oldest_age: None,
                youngest_age: None,
            },
        }
    }

    /// Drop every element and reset the accounting, leaving the queue usable.
    ///
    /// Blocked producers are woken since the queue now has room.
    pub fn clear(&self) -> QueueResult<()> {
        let mut state = self.lock_state()?;
        let dropped = state.elements.len();
        state.elements.clear();
        state.bytes_used = 0;
        drop(state);
        if dropped > 0 {
            log::debug!("cleared {} elements from '{}'", dropped, self.name);
        }
        self.not_full.notify_all();
        Ok(())
    }

    /// Close the queue and wake every blocked producer and consumer.
    ///
    /// Enqueues fail immediately afterwards; dequeues drain the remaining
    /// elements, then fail with [`QueueError::QueueClosed`]. Idempotent.
    pub fn close(&self) {
        match self.state.lock() {
            Ok(mut state) => state.closed = true,
            // A poisoned queue is still marked closed so waiters that recover
            // the guard observe the flag.
            Err(poisoned) => poisoned.into_inner().closed = true,
        }
        log::debug!("queue '{}' closed", self.name);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        match self.state.lock() {
            Ok(state) => state.closed,
            Err(poisoned) => poisoned.into_inner().closed,
        }
    }

    fn admission(&self, state: &QueueState, incoming: usize) -> Admission {
        if let Some(max_elements) = self.attrs.max_elements {
            if state.elements.len() >= max_elements {
                return Admission::Full(QueueError::QueueFull { max_elements });
            }
        }
        if let Some(max_bytes) = self.attrs.max_bytes {
            if state.bytes_used + incoming > max_bytes {
                return Admission::Full(QueueError::MemoryLimitExceeded { max_bytes });
            }
        }
        Admission::Admit
    }

    /// Finish a successful removal: fix the byte accounting, release the
    /// lock, and signal producers waiting for room.
    fn account_removal(&self, mut state: MutexGuard<'_, QueueState>, element: Element) -> Element {
        state.bytes_used -= element.size();
        log::trace!(
            "dequeued {} bytes from '{}' ({} remaining)",
            element.size(),
            self.name,
            state.elements.len()
        );
        drop(state);
        // Byte bounds make blocked producers heterogeneous: the one woken
        // might still not fit while another would, so wake them all.
        self.not_full.notify_all();
        element
    }

    fn age_of(&self, element: &Element) -> Duration {
        self.clock
            .system_time()
            .duration_since(element.enqueued_at)
            .unwrap_or(Duration::ZERO)
    }

    fn lock_state(&self) -> QueueResult<MutexGuard<'_, QueueState>> {
        handle_mutex_poison(self.state.lock(), |message| QueueError::LockPoisoned {
            message,
        })
    }

    fn closed_error(&self) -> QueueError {
        QueueError::QueueClosed {
            name: self.name.clone(),
        }
    }
}

impl fmt::Debug for NamedQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedQueue")
            .field("name", &self.name)
            .field("attrs", &self.attrs)
            .field("len", &self.len())
            .field("memory_used", &self.memory_used())
            .field("closed", &self.is_closed())
            .finish()
    }
}
