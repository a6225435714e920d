//! Capacity and accounting tests
//!
//! The accounting invariant: `len()` equals the number of live elements and
//! `memory_used()` equals the sum of their original payload lengths, after
//! any sequence of operations.

#[cfg(test)]
mod tests {
    use crate::queue::api::{OverflowPolicy, QueueAttributes, QueueError, QueueRegistry};

    #[test]
    fn test_accounting_tracks_every_operation() {
        let registry = QueueRegistry::new();
        let queue = registry.create("ledger").unwrap();

        let payloads: [&[u8]; 5] = [b"a", b"bb", b"ccc", b"dddd", b"eeeee"];
        let mut expected_count = 0usize;
        let mut expected_bytes = 0usize;

        for payload in payloads {
            queue.enqueue(payload, 0).unwrap();
            expected_count += 1;
            expected_bytes += payload.len();
            assert_eq!(queue.len(), expected_count);
            assert_eq!(queue.memory_used(), expected_bytes);
        }

        for _ in 0..2 {
            let element = queue.dequeue().unwrap();
            expected_count -= 1;
            expected_bytes -= element.size();
            assert_eq!(queue.len(), expected_count);
            assert_eq!(queue.memory_used(), expected_bytes);
        }

        queue.clear().unwrap();
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.memory_used(), 0);
    }

    #[test]
    fn test_reject_policy_element_bound() {
        let registry = QueueRegistry::new();
        let queue = registry
            .create_with("two-slots", QueueAttributes::bounded(2, OverflowPolicy::Reject))
            .unwrap();

        queue.enqueue(b"one", 0).unwrap();
        queue.enqueue(b"two", 0).unwrap();
        assert!(matches!(
            queue.enqueue(b"three", 0),
            Err(QueueError::QueueFull { max_elements: 2 })
        ));

        // A failed enqueue changes nothing
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.memory_used(), 6);

        // Room opens after a dequeue
        queue.dequeue().unwrap();
        queue.enqueue(b"three", 0).unwrap();
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_reject_policy_byte_bound() {
        let registry = QueueRegistry::new();
        let attrs = QueueAttributes {
            max_elements: None,
            max_bytes: Some(10),
            overflow: OverflowPolicy::Reject,
        };
        let queue = registry.create_with("ten-bytes", attrs).unwrap();

        queue.enqueue(b"123456", 0).unwrap();
        assert!(matches!(
            queue.enqueue(b"78901", 0),
            Err(QueueError::MemoryLimitExceeded { max_bytes: 10 })
        ));

        // A smaller payload that fits is still accepted
        queue.enqueue(b"7890", 0).unwrap();
        assert_eq!(queue.memory_used(), 10);
    }

    #[test]
    fn test_clear_makes_room_in_bounded_queue() {
        let registry = QueueRegistry::new();
        let queue = registry
            .create_with("resettable", QueueAttributes::bounded(1, OverflowPolicy::Reject))
            .unwrap();

        queue.enqueue(b"occupant", 0).unwrap();
        assert!(matches!(
            queue.enqueue(b"rejected", 0),
            Err(QueueError::QueueFull { .. })
        ));

        queue.clear().unwrap();
        queue.enqueue(b"accepted", 0).unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_stats_snapshot_consistency() {
        let registry = QueueRegistry::new();
        let queue = registry.create("snapshot").unwrap();

        queue.enqueue(b"abcd", 0).unwrap();
        queue.enqueue(b"efgh", 0).unwrap();

        let stats = queue.stats();
        assert_eq!(stats.elements, 2);
        assert_eq!(stats.bytes, 8);
        assert!(stats.oldest_age.is_some());
        assert!(stats.youngest_age.is_some());
        assert!(stats.oldest_age >= stats.youngest_age);

        queue.clear().unwrap();
        let empty = queue.stats();
        assert_eq!(empty.elements, 0);
        assert_eq!(empty.bytes, 0);
        assert_eq!(empty.oldest_age, None);
        assert_eq!(empty.youngest_age, None);
    }
}
