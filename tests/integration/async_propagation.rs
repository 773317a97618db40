//! Propagation across suspension points and interleaved continuation chains.

use ambient_context::{create_context, create_runner, depth, perform, Context, Runner};
use futures::future::join_all;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn test_override_survives_suspension() {
    let age = create_context(30u32);
    let run = create_runner([age.with(29)]).unwrap();

    let probe = age.clone();
    let seen = run
        .scope(async move {
            sleep(Duration::from_millis(1)).await;
            perform(&probe)
        })
        .await;
    assert_eq!(seen, 29);
    assert_eq!(perform(&age), 30);
}

#[tokio::test]
async fn test_many_suspension_cycles() {
    let counter = create_context(0usize);
    let run = create_runner([counter.with(7)]).unwrap();

    let probe = counter.clone();
    let seen = run
        .scope(async move {
            let mut seen = Vec::new();
            for _ in 0..50 {
                tokio::task::yield_now().await;
                seen.push(perform(&probe));
            }
            seen
        })
        .await;
    assert!(seen.iter().all(|&v| v == 7));
}

#[tokio::test(start_paused = true)]
async fn test_sibling_chains_are_isolated() {
    let chain = create_context(None::<&'static str>);
    let left = create_runner([chain.with(Some("left"))]).unwrap();
    let right = create_runner([chain.with(Some("right"))]).unwrap();

    let l = chain.clone();
    let r = chain.clone();
    let (left_seen, right_seen) = tokio::join!(
        left.scope(async move {
            sleep(Duration::from_millis(20)).await;
            let first = perform(&l);
            sleep(Duration::from_millis(20)).await;
            (first, perform(&l))
        }),
        right.scope(async move {
            sleep(Duration::from_millis(10)).await;
            let first = perform(&r);
            sleep(Duration::from_millis(20)).await;
            (first, perform(&r))
        }),
    );

    assert_eq!(left_seen, (Some("left"), Some("left")));
    assert_eq!(right_seen, (Some("right"), Some("right")));
}

#[tokio::test(start_paused = true)]
async fn test_resumption_ignores_runners_invoked_meanwhile() {
    let age = create_context(30u32);
    let early = create_runner([age.with(1)]).unwrap();
    let late = create_runner([age.with(2)]).unwrap();

    let probe = age.clone();
    let pending = early.scope(async move {
        sleep(Duration::from_millis(10)).await;
        perform(&probe)
    });

    // an unrelated runner runs to completion before the pending one resumes
    let unrelated = late.run(|| perform(&age));
    assert_eq!(unrelated, 2);

    let resumed = late.scope(pending).await;
    // the nearest scope on the continuation path is `early`, which is inside `late`
    assert_eq!(resumed, 1);
}

#[tokio::test]
async fn test_parent_read_at_invocation_not_at_poll() {
    let age = create_context(30u32);
    let outer = create_runner([age.with(29)]).unwrap();
    let inner = Runner::empty();

    let probe = age.clone();
    // built inside `outer`, polled outside it
    let pending = outer.run(|| inner.scope(async move { perform(&probe) }));
    assert_eq!(pending.await, 29);
}

#[tokio::test(start_paused = true)]
async fn test_nested_runners_inside_continuations() {
    let age = create_context(30u32);
    let name = create_context(String::from("Marcel"));
    let run = create_runner([age.with(29)]).unwrap();
    let run2 = create_runner([name.with("Not Marcel".to_string())]).unwrap();

    let (a, n) = (age.clone(), name.clone());
    let seen = run
        .scope(async move {
            sleep(Duration::from_millis(5)).await;
            run2.scope(async move {
                sleep(Duration::from_millis(5)).await;
                (perform(&a), perform(&n), depth())
            })
            .await
        })
        .await;

    assert_eq!(seen, (29, "Not Marcel".to_string(), 2));
}

#[tokio::test]
async fn test_run_async_scopes_callback_and_its_future() {
    let age = create_context(30u32);
    let run = create_runner([age.with(29)]).unwrap();

    let probe = age.clone();
    let (sync_part, async_part) = run
        .run_async(|| {
            let at_call = perform(&age);
            async move {
                tokio::task::yield_now().await;
                (at_call, perform(&probe))
            }
        })
        .await;
    assert_eq!((sync_part, async_part), (29, 29));
}

#[tokio::test]
async fn test_async_result_is_returned_unchanged() {
    let run = Runner::empty();
    let result: Result<u32, &str> = run.scope(async { Err("failed") }).await;
    assert_eq!(result, Err("failed"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_extended_runners() {
    let slot: Context<u64> = create_context(0);
    let base = create_runner([slot.with(1)]).unwrap();

    let futures = (0..16u64).map(|i| {
        let per_call = base.extend([slot.with(i)]).unwrap();
        let probe = slot.clone();
        per_call.scope(async move {
            sleep(Duration::from_millis(16 - i)).await;
            (i, perform(&probe))
        })
    });

    for (expected, seen) in join_all(futures).await {
        assert_eq!(expected, seen);
    }
}

#[tokio::test(start_paused = true)]
async fn test_one_runner_invoked_concurrently() {
    let age = create_context(30u32);
    let name = create_context(0usize);
    let shared = create_runner([age.with(29)]).unwrap();

    let chains = (0..8usize).map(|i| {
        let inner = create_runner([name.with(i)]).unwrap();
        let (a, n) = (age.clone(), name.clone());
        shared.scope(async move {
            sleep(Duration::from_millis(8 - i as u64)).await;
            inner
                .scope(async move {
                    sleep(Duration::from_millis(1 + i as u64)).await;
                    (i, perform(&a), perform(&n), depth())
                })
                .await
        })
    });

    for (i, seen_age, seen_name, seen_depth) in join_all(chains).await {
        assert_eq!(seen_age, 29);
        assert_eq!(seen_name, i);
        assert_eq!(seen_depth, 2);
    }
    assert_eq!(perform(&age), 30);
}

#[tokio::test]
async fn test_scope_keeps_association_of_creation_site() {
    let age = create_context(30u32);
    let name = create_context(String::from("Marcel"));
    let shared = create_runner([age.with(29)]).unwrap();
    let outer = create_runner([name.with("Not Marcel".to_string())]).unwrap();

    let (a, n) = (age.clone(), name.clone());
    // built at the root, so `outer` wrapping it later is not its parent
    let pending = shared.scope(async move { (perform(&a), perform(&n)) });
    let seen = outer.scope(pending).await;
    assert_eq!(seen, (29, "Marcel".to_string()));

    // built inside the polled body, so `outer` is its parent
    let (a, n) = (age.clone(), name.clone());
    let seen = outer
        .scope(async move { shared.scope(async move { (perform(&a), perform(&n)) }).await })
        .await;
    assert_eq!(seen, (29, "Not Marcel".to_string()));
}

#[tokio::test]
async fn test_future_returned_from_run_escapes_scope() {
    let age = create_context(30u32);
    let run = create_runner([age.with(29)]).unwrap();

    let probe = age.clone();
    let escaped = run.run(|| async move { perform(&probe) });
    assert_eq!(escaped.await, 30);

    let probe = age.clone();
    let kept = run.run_async(|| async move { perform(&probe) });
    assert_eq!(kept.await, 29);
}
