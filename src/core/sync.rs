//! Synchronization utilities for robust mutex handling
//!
//! A panic while a producer or consumer holds a queue lock poisons that lock.
//! Queue operations treat a poisoned lock as "operation could not proceed"
//! and surface it as a typed error instead of propagating the panic.

use std::sync::LockResult;

/// Convert a lock result into an application error on poison.
///
/// The guard is returned untouched on success. On poison, `error_constructor`
/// receives a descriptive message and its result is returned as the error.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use postbox::core::sync::handle_mutex_poison;
/// use postbox::queue::QueueError;
///
/// let mutex = Mutex::new(0usize);
/// let guard = handle_mutex_poison(mutex.lock(), |message| {
///     QueueError::LockPoisoned { message }
/// }).unwrap();
/// assert_eq!(*guard, 0);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "mutex poisoned by a panic in another thread holding the lock: {:?}",
            poison_err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[derive(Debug, PartialEq)]
    struct TestError {
        message: String,
    }

    #[test]
    fn test_handle_mutex_poison_success() {
        let mutex = Mutex::new(42);
        let result = handle_mutex_poison(mutex.lock(), |msg| TestError { message: msg });

        assert!(result.is_ok());
        assert_eq!(*result.unwrap(), 42);
    }

    #[test]
    fn test_handle_mutex_poison_with_poisoned_mutex() {
        let mutex = Arc::new(Mutex::new(42));
        let mutex_clone = Arc::clone(&mutex);

        // Poison the mutex by panicking while holding the lock
        let _ = thread::spawn(move || {
            let _guard = mutex_clone.lock().unwrap();
            panic!("intentional panic to poison mutex");
        })
        .join();

        let result = handle_mutex_poison(mutex.lock(), |msg| TestError { message: msg });

        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("mutex poisoned"));
    }
}
