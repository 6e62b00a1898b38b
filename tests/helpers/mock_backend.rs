use async_trait::async_trait;
use sns_sqs_workers::{
    consumer::QueueClient,
    core::{types::ReceivedMessage, MessageEnvelope, MessageSink},
    publisher::TopicPublisher,
    Result, WorkerError,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

pub const QUEUE_URL_PREFIX: &str = "https://sqs.test.local/000000000000/";

pub fn queue_url(name: &str) -> String {
    format!("{QUEUE_URL_PREFIX}{name}")
}

/// A publish call recorded by [`MockTopic`].
#[derive(Debug, Clone)]
pub struct PublishCall {
    pub topic: String,
    pub envelope: MessageEnvelope,
    pub at: Instant,
}

/// In-memory topic that records every publish.
#[derive(Default)]
pub struct MockTopic {
    calls: Mutex<Vec<PublishCall>>,
    failure: Option<String>,
}

impl MockTopic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every publish fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<PublishCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TopicPublisher for MockTopic {
    async fn publish(&self, topic: &str, envelope: &MessageEnvelope) -> Result<Option<String>> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(PublishCall {
            topic: topic.to_string(),
            envelope: envelope.clone(),
            at: Instant::now(),
        });

        if let Some(message) = &self.failure {
            return Err(WorkerError::Publish {
                topic: topic.to_string(),
                message: message.clone(),
            });
        }
        Ok(Some(format!("msg-{}", calls.len())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueCall {
    Poll {
        queue_url: String,
        visibility_timeout_secs: i32,
    },
    Delete {
        queue_url: String,
        receipt_handle: String,
    },
}

/// In-memory queues keyed by URL. A receive pops the head message; nothing
/// is redelivered.
#[derive(Default)]
pub struct MockQueues {
    queues: Mutex<HashMap<String, VecDeque<ReceivedMessage>>>,
    calls: Mutex<Vec<(Instant, QueueCall)>>,
    delete_failure: Option<String>,
    receive_failure: Option<String>,
}

impl MockQueues {
    pub fn new(names: &[&str]) -> Self {
        let queues = names
            .iter()
            .map(|name| (queue_url(name), VecDeque::new()))
            .collect();
        Self {
            queues: Mutex::new(queues),
            ..Default::default()
        }
    }

    pub fn with_delete_failure(mut self, message: &str) -> Self {
        self.delete_failure = Some(message.to_string());
        self
    }

    pub fn with_receive_failure(mut self, message: &str) -> Self {
        self.receive_failure = Some(message.to_string());
        self
    }

    pub fn push(&self, name: &str, message: ReceivedMessage) {
        self.queues
            .lock()
            .unwrap()
            .get_mut(&queue_url(name))
            .expect("unknown queue")
            .push_back(message);
    }

    pub fn calls(&self) -> Vec<(Instant, QueueCall)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn polls_of(&self, name: &str) -> usize {
        let url = queue_url(name);
        self.calls()
            .iter()
            .filter(|(_, call)| matches!(call, QueueCall::Poll { queue_url, .. } if *queue_url == url))
            .count()
    }

    pub fn deleted_handles(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|(_, call)| match call {
                QueueCall::Delete { receipt_handle, .. } => Some(receipt_handle),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: QueueCall) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }
}

#[async_trait]
impl QueueClient for MockQueues {
    async fn resolve_queue_url(&self, queue_name: &str) -> Result<String> {
        let url = queue_url(queue_name);
        if self.queues.lock().unwrap().contains_key(&url) {
            Ok(url)
        } else {
            Err(WorkerError::Resolve {
                queue: queue_name.to_string(),
                message: "AWS.SimpleQueueService.NonExistentQueue".to_string(),
            })
        }
    }

    async fn receive_one(
        &self,
        queue_url: &str,
        visibility_timeout_secs: i32,
    ) -> Result<Option<ReceivedMessage>> {
        self.record(QueueCall::Poll {
            queue_url: queue_url.to_string(),
            visibility_timeout_secs,
        });

        if let Some(message) = &self.receive_failure {
            return Err(WorkerError::Receive {
                queue: queue_url.to_string(),
                message: message.clone(),
            });
        }

        Ok(self
            .queues
            .lock()
            .unwrap()
            .get_mut(queue_url)
            .and_then(VecDeque::pop_front))
    }

    async fn delete(&self, queue_url: &str, receipt_handle: &str) -> Result<()> {
        self.record(QueueCall::Delete {
            queue_url: queue_url.to_string(),
            receipt_handle: receipt_handle.to_string(),
        });

        match &self.delete_failure {
            Some(message) => Err(WorkerError::Delete {
                queue: queue_url.to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Collects progress lines instead of printing them.
#[derive(Default)]
pub struct CapturedSink {
    lines: Mutex<Vec<String>>,
}

impl CapturedSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines().iter().filter(|l| l.contains(needle)).count()
    }
}

impl MessageSink for CapturedSink {
    fn emit(&self, line: &str) -> std::io::Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}
