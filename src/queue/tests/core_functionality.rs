//! Core functionality tests - essential queue operations
//!
//! These cover the contract every consumer of the queue system relies on:
//! FIFO order, accounting, idempotent creation, and payload integrity.

#[cfg(test)]
mod tests {
    use crate::queue::api::{QueueAttributes, QueueRegistry};
    use std::sync::Arc;

    #[test]
    fn test_jobs_scenario() {
        let registry = QueueRegistry::new();
        let jobs = registry.create("jobs").unwrap();

        jobs.enqueue(b"alpha", 1).unwrap();
        jobs.enqueue(b"beta", 9).unwrap();
        jobs.enqueue(b"gamma", 1).unwrap();

        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs.memory_used(), 14);

        // Insertion order wins over the higher priority on "beta"
        let first = jobs.dequeue().unwrap();
        assert_eq!(first.data, b"alpha");
        assert_eq!(first.size(), 5);

        let second = jobs.dequeue().unwrap();
        assert_eq!(second.data, b"beta");
        assert_eq!(second.size(), 4);
        assert_eq!(second.priority, 9);

        let third = jobs.dequeue().unwrap();
        assert_eq!(third.data, b"gamma");
        assert_eq!(third.size(), 5);

        assert_eq!(jobs.len(), 0);
        assert_eq!(jobs.memory_used(), 0);
    }

    #[test]
    fn test_fifo_independent_of_priority() {
        let registry = QueueRegistry::new();
        let queue = registry.create("ordered").unwrap();

        let priorities = [5, -3, 100, 0, 42, -77, 9, 9];
        for (index, priority) in priorities.iter().enumerate() {
            queue
                .enqueue(format!("element-{}", index).as_bytes(), *priority)
                .unwrap();
        }

        for (index, priority) in priorities.iter().enumerate() {
            let element = queue.dequeue().unwrap();
            assert_eq!(element.data, format!("element-{}", index).as_bytes());
            assert_eq!(element.priority, *priority);
        }
    }

    #[test]
    fn test_round_trip_integrity() {
        let registry = QueueRegistry::new();
        let queue = registry.create("binary").unwrap();

        // Arbitrary bytes, not valid UTF-8
        let payload: Vec<u8> = vec![0, 255, 128, 7, 0, 13, 200];
        queue.enqueue(&payload, 0).unwrap();

        let element = queue.dequeue().unwrap();
        assert_eq!(element.data, payload);
        assert_eq!(element.size(), payload.len());
    }

    #[test]
    fn test_idempotent_create() {
        let registry = QueueRegistry::new();

        let first = registry.create("shared").unwrap();
        let second = registry.create("shared").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.queue_count(), 1);

        // Both handles address the same state
        first.enqueue(b"via-first", 0).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second.dequeue().unwrap().data, b"via-first");
        assert_eq!(first.len(), 0);
    }

    #[test]
    fn test_create_with_attrs_ignored_for_existing_queue() {
        let registry = QueueRegistry::new();

        let original = registry.create("settled").unwrap();
        let again = registry
            .create_with("settled", QueueAttributes::bounded(1, Default::default()))
            .unwrap();

        assert!(Arc::ptr_eq(&original, &again));
        // The original unbounded attributes stay in force
        assert_eq!(again.attributes().max_elements, None);
    }

    #[test]
    fn test_clear_scenario() {
        let registry = QueueRegistry::new();
        let queue = registry.create("jobs").unwrap();

        queue.enqueue(b"one", 0).unwrap();
        queue.enqueue(b"two", 0).unwrap();
        queue.clear().unwrap();

        assert_eq!(queue.len(), 0);
        assert_eq!(queue.memory_used(), 0);

        // Queue remains usable after a clear
        queue.enqueue(b"three", 0).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue().unwrap().data, b"three");
    }
}
