pub mod cancellable_loop;
pub mod output;
pub mod shutdown;
pub mod types;

pub use cancellable_loop::{CancellableLoop, LoopAction};
pub use output::{MessageSink, StdoutSink};
pub use shutdown::{wait_for_interrupt, ShutdownCoordinator};
pub use types::{MessageAttribute, MessageEnvelope, ReceivedMessage, WorkerReport};
