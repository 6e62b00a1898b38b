pub mod stats;

pub use stats::{StatsSnapshot, WorkerStats};
