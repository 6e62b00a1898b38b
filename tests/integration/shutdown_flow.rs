use crate::helpers::{CapturedSink, MockQueues, MockTopic};
use sns_sqs_workers::{
    app::{run_publisher, run_subscriber},
    ConsumerConfig, DeleteFailurePolicy, PublisherConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_interrupt_while_consumers_sleep_exits_cleanly() -> anyhow::Result<()> {
    let queues = Arc::new(MockQueues::new(&["q1", "q2"]));
    let sink = Arc::new(CapturedSink::default());
    let config = ConsumerConfig {
        queue_names: vec!["q1".to_string(), "q2".to_string()],
        visibility_timeout_secs: 5,
        poll_interval_secs: 10,
        delete_failure_policy: DeleteFailurePolicy::Fatal,
    };

    let (signal_tx, signal_rx) = oneshot::channel::<Instant>();
    tokio::spawn(async move {
        // Both workers polled at t=0 and are now sleeping until t=10.
        tokio::time::sleep(Duration::from_secs(2)).await;
        let _ = signal_tx.send(Instant::now());
    });

    let signalled_at = Arc::new(std::sync::Mutex::new(None));
    let reports = run_subscriber(&config, queues.clone(), sink.clone(), {
        let signalled_at = signalled_at.clone();
        async move {
            let at = signal_rx.await.expect("signal sender dropped");
            *signalled_at.lock().unwrap() = Some(at);
            Ok(())
        }
    })
    .await?;
    let finished_at = Instant::now();

    let signalled_at = signalled_at.lock().unwrap().expect("shutdown was triggered");
    assert!(
        finished_at - signalled_at < Duration::from_secs(1),
        "drain took {:?}",
        finished_at - signalled_at
    );

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.iterations == 1));
    assert!(queues.calls().iter().all(|(at, _)| *at < signalled_at));
    assert_eq!(queues.polls_of("q1"), 1);
    assert_eq!(queues.polls_of("q2"), 1);

    assert_eq!(sink.count_containing("Received signal. Exiting."), 1);
    assert_eq!(sink.count_containing("Stopping dequeue."), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_publisher_stops_after_interrupt() -> anyhow::Result<()> {
    let topic = Arc::new(MockTopic::new());
    let config = PublisherConfig {
        topic_arn: "T".to_string(),
        send_interval_secs: 3,
    };
    let (signal_tx, signal_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn({
        let topic = topic.clone();
        async move {
            run_publisher(&config, topic, Arc::new(CapturedSink::default()), async move {
                let _ = signal_rx.await;
                Ok(())
            })
            .await
        }
    });

    tokio::time::sleep(Duration::from_secs(4)).await;
    let sent_before = topic.calls().len();
    assert_eq!(sent_before, 2);

    let _ = signal_tx.send(());
    let reports = handle.await??;

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(topic.calls().len(), sent_before, "no publish after shutdown");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].iterations, sent_before as u64);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_failing_signal_handler_is_reported() {
    let queues = Arc::new(MockQueues::new(&["q1", "q2"]));
    let config = ConsumerConfig {
        queue_names: vec!["q1".to_string(), "q2".to_string()],
        visibility_timeout_secs: 0,
        poll_interval_secs: 1,
        delete_failure_policy: DeleteFailurePolicy::Fatal,
    };

    let result = run_subscriber(&config, queues, Arc::new(CapturedSink::default()), async {
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "signal handler unavailable",
        ))
    })
    .await;

    let err = result.expect_err("signal setup failure is an error");
    assert!(err.to_string().contains("signal handler unavailable"));
}
