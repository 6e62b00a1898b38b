use crate::monitoring::StatsSnapshot;
use serde::{Deserialize, Serialize};

/// Name of the single attribute subscriptions filter on.
pub const VERSION_ATTRIBUTE: &str = "version";

/// Backend data type of the version attribute.
pub const VERSION_DATA_TYPE: &str = "Number";

/// Versions the publisher picks from.
pub const VERSIONS: [u32; 2] = [1, 2];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttribute {
    pub name: String,
    pub data_type: String,
    pub string_value: String,
}

/// Outbound message: a body plus the typed attribute sent with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub body: String,
    pub attribute: MessageAttribute,
}

impl MessageEnvelope {
    pub fn for_version(version: u32) -> Self {
        Self {
            body: format!("Message to version {version}."),
            attribute: MessageAttribute {
                name: VERSION_ATTRIBUTE.to_string(),
                data_type: VERSION_DATA_TYPE.to_string(),
                string_value: version.to_string(),
            },
        }
    }

    /// The version carried by the attribute, if it is one.
    pub fn version(&self) -> Option<u32> {
        if self.attribute.name != VERSION_ATTRIBUTE {
            return None;
        }
        self.attribute.string_value.parse().ok()
    }
}

/// A message handed out by a queue poll.
///
/// Both fields are opaque. Without a receipt handle the delivery cannot be
/// deleted and is left for the backend to redeliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub body: Option<String>,
    pub receipt_handle: Option<String>,
}

impl ReceivedMessage {
    pub fn new(body: impl Into<String>, receipt_handle: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            receipt_handle: Some(receipt_handle.into()),
        }
    }
}

/// What a worker hands back once its loop has exited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerReport {
    pub name: String,
    pub iterations: u64,
    pub stats: StatsSnapshot,
}
