use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to publish to topic {topic}: {message}")]
    Publish { topic: String, message: String },

    #[error("Failed to resolve queue {queue}: {message}")]
    Resolve { queue: String, message: String },

    #[error("Failed to receive from queue {queue}: {message}")]
    Receive { queue: String, message: String },

    #[error("Failed to delete message from queue {queue}: {message}")]
    Delete { queue: String, message: String },

    #[error("Worker {0} terminated abnormally")]
    WorkerPanicked(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
