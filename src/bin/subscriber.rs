// Subscriber binary
// Polls two SQS queues, prints each message and deletes it, until ctrl-c

use clap::Parser;
use sns_sqs_workers::{
    app::run_subscriber,
    config::{normalize_single_dash_flags, SubscriberArgs, SUBSCRIBER_LONG_FLAGS, SUBSCRIBER_USAGE},
    consumer::SqsQueueClient,
    core::{wait_for_interrupt, StdoutSink},
    ConsumerConfig, WorkerError,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sns_sqs_workers=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let argv = normalize_single_dash_flags(std::env::args(), SUBSCRIBER_LONG_FLAGS);
    let config = match ConsumerConfig::from_args(SubscriberArgs::parse_from(argv)) {
        Ok(config) => config,
        Err(WorkerError::Config(reason)) => {
            // Missing queue names are a usage problem, not a failure.
            error!("Invalid configuration: {reason}");
            println!("{SUBSCRIBER_USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            println!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Queues: {:?}", config.queue_names);

    let client = Arc::new(SqsQueueClient::from_env().await);

    match run_subscriber(&config, client, Arc::new(StdoutSink), wait_for_interrupt()).await {
        Ok(reports) => {
            for report in reports {
                info!(
                    "Consumer '{}': {} received, {} deleted",
                    report.name, report.stats.received, report.stats.deleted
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
