//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue name cannot be empty")]
    EmptyName,

    #[error("payload cannot be empty")]
    EmptyPayload,

    #[error("queue is full (max elements: {max_elements})")]
    QueueFull { max_elements: usize },

    #[error("queue memory limit exceeded (max bytes: {max_bytes})")]
    MemoryLimitExceeded { max_bytes: usize },

    #[error("queue not found: {name}")]
    QueueNotFound { name: String },

    #[error("queue is closed: {name}")]
    QueueClosed { name: String },

    #[error("registry has been shut down")]
    RegistryClosed,

    #[error("invalid limits configuration: {message}")]
    InvalidLimits { message: String },

    #[error("lock poisoned: {message}")]
    LockPoisoned { message: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
