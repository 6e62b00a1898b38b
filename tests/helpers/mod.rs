pub mod mock_backend;

pub use mock_backend::{queue_url, CapturedSink, MockQueues, MockTopic, QueueCall};
