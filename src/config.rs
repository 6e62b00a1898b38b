use crate::error::{Result, WorkerError};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shortest pause between two iterations of any worker loop.
pub const MIN_INTERVAL_SECS: u64 = 1;

/// Longest visibility timeout the queue backend accepts (12 hours).
pub const MAX_VISIBILITY_TIMEOUT_SECS: i32 = 12 * 60 * 60;

pub const DEFAULT_SEND_INTERVAL_SECS: i64 = 3;
pub const DEFAULT_VISIBILITY_TIMEOUT_SECS: i64 = 5;
pub const DEFAULT_POLL_INTERVAL_SECS: i64 = 1;

pub const PUBLISHER_USAGE: &str = "You must supply a topic ARN\nUsage: publisher -t TOPIC_ARN";
pub const SUBSCRIBER_USAGE: &str =
    "You must supply the name of the queues (-q1 QUEUE_ONE -q2 QUEUE_TWO)";

/// Command-line flags of the publisher binary.
#[derive(Debug, Parser)]
#[command(name = "publisher", about = "Publishes version-tagged messages to a topic")]
pub struct PublisherArgs {
    /// The ARN of the topic to publish to
    #[arg(short = 't', long = "topic", env = "SNS_TOPIC_ARN")]
    pub topic: Option<String>,

    /// The number of seconds to sleep between publishes
    #[arg(
        short = 's',
        long = "sleep",
        default_value_t = DEFAULT_SEND_INTERVAL_SECS,
        allow_negative_numbers = true
    )]
    pub sleep: i64,
}

/// Command-line flags of the subscriber binary.
#[derive(Debug, Parser)]
#[command(name = "subscriber", about = "Polls two queues and deletes what it reads")]
pub struct SubscriberArgs {
    /// The name of the first queue
    #[arg(long = "q1", env = "SQS_QUEUE_ONE")]
    pub queue_one: Option<String>,

    /// The name of the second queue
    #[arg(long = "q2", env = "SQS_QUEUE_TWO")]
    pub queue_two: Option<String>,

    /// How long, in seconds, a received message is hidden from others
    #[arg(
        short = 't',
        long = "timeout",
        default_value_t = DEFAULT_VISIBILITY_TIMEOUT_SECS,
        allow_negative_numbers = true
    )]
    pub timeout: i64,

    /// How long, in seconds, to wait between polls
    #[arg(
        short = 'i',
        long = "interval",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        allow_negative_numbers = true
    )]
    pub interval: i64,

    /// Log failed deletes and keep polling instead of exiting
    #[arg(long = "continue-on-delete-error")]
    pub continue_on_delete_error: bool,
}

/// Multi-character flags that are also accepted with a single dash.
pub const SUBSCRIBER_LONG_FLAGS: &[&str] = &["q1", "q2"];

/// Rewrites `-q1 value` / `-q1=value` into `--q1 ...` for the given flag
/// names so clap sees them as long options. Everything else passes through.
pub fn normalize_single_dash_flags<I>(args: I, long_flags: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split('=').next().unwrap_or(rest);
            if long_flags.contains(&name) {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

pub fn clamp_interval(secs: i64) -> u64 {
    secs.max(MIN_INTERVAL_SECS as i64) as u64
}

pub fn clamp_visibility_timeout(secs: i64) -> i32 {
    secs.clamp(0, MAX_VISIBILITY_TIMEOUT_SECS as i64) as i32
}

/// What a consumer does when deleting a processed message fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteFailurePolicy {
    /// Report the error and stop the whole process.
    #[default]
    Fatal,
    /// Log the error and keep polling; the backend redelivers the message
    /// after its visibility timeout.
    LogAndContinue,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublisherConfig {
    pub topic_arn: String,
    pub send_interval_secs: u64,
}

impl PublisherConfig {
    pub fn from_args(args: PublisherArgs) -> Result<Self> {
        let topic_arn = args
            .topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| WorkerError::Config("topic ARN is required".to_string()))?;

        Ok(Self {
            topic_arn,
            send_interval_secs: clamp_interval(args.sleep),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.topic_arn.is_empty() {
            return Err(WorkerError::Config("topic ARN is required".to_string()));
        }

        if self.send_interval_secs < MIN_INTERVAL_SECS {
            return Err(WorkerError::Config(format!(
                "Send interval must be at least {MIN_INTERVAL_SECS}s"
            )));
        }

        Ok(())
    }

    pub fn send_interval(&self) -> Duration {
        Duration::from_secs(self.send_interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsumerConfig {
    pub queue_names: Vec<String>,
    pub visibility_timeout_secs: i32,
    pub poll_interval_secs: u64,
    pub delete_failure_policy: DeleteFailurePolicy,
}

impl ConsumerConfig {
    pub fn from_args(args: SubscriberArgs) -> Result<Self> {
        let required = |name: Option<String>| {
            name.map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .ok_or_else(|| WorkerError::Config("both queue names are required".to_string()))
        };
        let queue_names = vec![required(args.queue_one)?, required(args.queue_two)?];

        let delete_failure_policy = if args.continue_on_delete_error {
            DeleteFailurePolicy::LogAndContinue
        } else {
            DeleteFailurePolicy::Fatal
        };

        Ok(Self {
            queue_names,
            visibility_timeout_secs: clamp_visibility_timeout(args.timeout),
            poll_interval_secs: clamp_interval(args.interval),
            delete_failure_policy,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.queue_names.is_empty() {
            return Err(WorkerError::Config(
                "At least one queue is required".to_string(),
            ));
        }

        if self.queue_names.iter().any(|q| q.is_empty()) {
            return Err(WorkerError::Config(
                "Queue names must not be empty".to_string(),
            ));
        }

        if !(0..=MAX_VISIBILITY_TIMEOUT_SECS).contains(&self.visibility_timeout_secs) {
            return Err(WorkerError::Config(format!(
                "Visibility timeout must be between 0 and {MAX_VISIBILITY_TIMEOUT_SECS}s"
            )));
        }

        if self.poll_interval_secs < MIN_INTERVAL_SECS {
            return Err(WorkerError::Config(format!(
                "Poll interval must be at least {MIN_INTERVAL_SECS}s"
            )));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
