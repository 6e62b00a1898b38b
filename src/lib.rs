pub mod app;
pub mod config;
pub mod consumer;
pub mod core;
pub mod error;
pub mod monitoring;
pub mod publisher;

pub use config::{ConsumerConfig, DeleteFailurePolicy, PublisherConfig};
pub use crate::core::{CancellableLoop, ShutdownCoordinator, WorkerReport};
pub use error::{Result, WorkerError};
