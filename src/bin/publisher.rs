// Publisher binary
// Publishes a randomly versioned message to an SNS topic every few seconds until ctrl-c

use clap::Parser;
use sns_sqs_workers::{
    app::run_publisher,
    config::{PublisherArgs, PUBLISHER_USAGE},
    core::{wait_for_interrupt, StdoutSink},
    publisher::SnsTopicPublisher,
    PublisherConfig, WorkerError,
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

    let config = match PublisherConfig::from_args(PublisherArgs::parse()) {
        Ok(config) => config,
        Err(WorkerError::Config(reason)) => {
            error!("Invalid configuration: {reason}");
            println!("{PUBLISHER_USAGE}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Publishing to {} every {}s",
        config.topic_arn, config.send_interval_secs
    );

    let publisher = Arc::new(SnsTopicPublisher::from_env().await);

    match run_publisher(&config, publisher, Arc::new(StdoutSink), wait_for_interrupt()).await {
        Ok(reports) => {
            for report in reports {
                info!(
                    "Worker '{}' published {} messages",
                    report.name, report.stats.published
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
