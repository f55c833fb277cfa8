//! Coalescer Tests
//!
//! ## Test Scopes
//! - **Deduplication**: Concurrent calls for one key run the load once and share its result.
//! - **Errors**: Failures are shared by the callers of one window but not remembered afterwards.
//! - **Isolation**: A slow load for one key never blocks another key.
//! - **Abandonment**: A cancelled leader hands the load over to a waiter.

#[cfg(test)]
mod tests {
    use crate::coalesce::Coalescer;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tokio::task::JoinSet;

    #[tokio::test]
    async fn test_single_caller_runs_load() {
        let coalescer: Coalescer<u32> = Coalescer::new();

        let value = coalescer.run("key", || async { 42 }).await;

        assert_eq!(value, 42);
        assert_eq!(coalescer.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_share_one_load() {
        let coalescer: Arc<Coalescer<String>> = Arc::new(Coalescer::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = tokio::sync::watch::channel(false);

        let mut set = JoinSet::new();
        for _ in 0..20 {
            let coalescer = coalescer.clone();
            let calls = calls.clone();
            let mut release_rx = release_rx.clone();
            set.spawn(async move {
                coalescer
                    .run("hot", || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        let _ = release_rx.wait_for(|released| *released).await;
                        "value".to_string()
                    })
                    .await
            });
        }

        // Let every task register before the load is allowed to finish.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(coalescer.in_flight(), 1);
        release_tx.send_replace(true);

        while let Some(result) = set.join_next().await {
            assert_eq!(result.unwrap(), "value");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coalescer.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_errors_are_shared_within_window() {
        let coalescer: Arc<Coalescer<Result<u32, String>>> = Arc::new(Coalescer::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut set = JoinSet::new();
        for _ in 0..10 {
            let coalescer = coalescer.clone();
            let calls = calls.clone();
            set.spawn(async move {
                coalescer
                    .run("broken", || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        Err::<u32, _>("source down".to_string())
                    })
                    .await
            });
        }

        while let Some(result) = set.join_next().await {
            assert_eq!(result.unwrap(), Err("source down".to_string()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_completed_result_is_not_remembered() {
        let coalescer: Coalescer<Result<u32, String>> = Coalescer::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let first = coalescer
            .run("key", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("boom".to_string())
            })
            .await;
        assert!(first.is_err());

        let second = coalescer
            .run("key", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            })
            .await;
        assert_eq!(second, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_distinct_keys_do_not_block_each_other() {
        let coalescer: Arc<Coalescer<&'static str>> = Arc::new(Coalescer::new());
        let (unblock_tx, unblock_rx) = oneshot::channel::<()>();

        // The load for "slow" cannot finish until the load for "fast" has completed.
        let slow = {
            let coalescer = coalescer.clone();
            tokio::spawn(async move {
                coalescer
                    .run("slow", || async move {
                        let _ = unblock_rx.await;
                        "slow"
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let fast = tokio::time::timeout(
            Duration::from_secs(2),
            coalescer.run("fast", || async { "fast" }),
        )
        .await
        .expect("fast key must not wait on the slow key");
        assert_eq!(fast, "fast");

        unblock_tx.send(()).unwrap();
        assert_eq!(slow.await.unwrap(), "slow");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_waiter_takes_over_abandoned_load() {
        let coalescer: Arc<Coalescer<u32>> = Arc::new(Coalescer::new());

        let leader = {
            let coalescer = coalescer.clone();
            tokio::spawn(async move {
                coalescer
                    .run("key", || std::future::pending::<u32>())
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(coalescer.in_flight(), 1);

        let waiter = {
            let coalescer = coalescer.clone();
            tokio::spawn(async move { coalescer.run("key", || async { 9 }).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        leader.abort();

        let value = tokio::time::timeout(Duration::from_secs(2), waiter)
            .await
            .expect("waiter must not hang after the leader is cancelled")
            .unwrap();
        assert_eq!(value, 9);
        assert_eq!(coalescer.in_flight(), 0);
    }
}
