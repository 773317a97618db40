//! Demo scenarios driven by the `ambient` binary.

use crate::context::{create_context, Context};
use crate::error::AmbientError;
use crate::perform::perform;
use crate::propagate;
use crate::runner::create_runner;
use futures::future::join_all;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::{debug, info};

static AGE: LazyLock<Context<u32>> = LazyLock::new(|| create_context(30));
static NAME: LazyLock<Context<String>> = LazyLock::new(|| create_context("Marcel".to_string()));
static CHAIN: LazyLock<Context<Option<usize>>> = LazyLock::new(|| create_context(None));

/// Values observed by the nested-runner demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub outside: (u32, String),
    pub deferred: (u32, String),
}

/// Outer runner overrides the age; after a delay, an inner runner overrides
/// the name. The deferred callback sees both overrides.
pub async fn demo(delay: Duration) -> Result<DemoReport, AmbientError> {
    let run = create_runner([AGE.with(29)])?;
    let run2 = create_runner([NAME.with("Not Marcel".to_string())])?;

    let deferred = run
        .scope(async move {
            tokio::time::sleep(delay).await;
            run2.run(|| (perform(&AGE), perform(&NAME)))
        })
        .await;

    info!(age = deferred.0, name = %deferred.1, "Deferred callback resumed");

    Ok(DemoReport {
        outside: (perform(&AGE), perform(&NAME)),
        deferred,
    })
}

/// What one sibling chain saw when it resumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainObservation {
    pub chain: usize,
    pub observed: Option<usize>,
    pub resume_order: usize,
}

impl ChainObservation {
    pub fn is_isolated(&self) -> bool {
        self.observed == Some(self.chain)
    }
}

/// Start `chains` sibling runners, each overriding the same context with its
/// own index. Later chains wake first, so resumption order is the reverse of
/// start order. Results are sorted by chain index.
pub async fn isolation(
    chains: usize,
    delay: Duration,
    spawn: bool,
) -> Result<Vec<ChainObservation>, AmbientError> {
    let resumed = Arc::new(AtomicUsize::new(0));
    let mut observations = Vec::with_capacity(chains);

    if spawn {
        let mut handles = Vec::with_capacity(chains);
        for chain in 0..chains {
            let run = create_runner([CHAIN.with(Some(chain))])?;
            let body = chain_body(chain, chains, delay, Arc::clone(&resumed));
            handles.push(run.run(|| propagate::spawn(body)));
        }
        for handle in handles {
            observations.push(handle.await?);
        }
    } else {
        let mut futures = Vec::with_capacity(chains);
        for chain in 0..chains {
            let run = create_runner([CHAIN.with(Some(chain))])?;
            futures.push(run.scope(chain_body(chain, chains, delay, Arc::clone(&resumed))));
        }
        observations = join_all(futures).await;
    }

    observations.sort_by_key(|o| o.chain);
    Ok(observations)
}

async fn chain_body(
    chain: usize,
    chains: usize,
    delay: Duration,
    resumed: Arc<AtomicUsize>,
) -> ChainObservation {
    let pause = delay * u32::try_from(chains - chain).unwrap_or(u32::MAX);
    tokio::time::sleep(pause).await;
    tokio::task::yield_now().await;

    let observed = perform(&CHAIN);
    let resume_order = resumed.fetch_add(1, Ordering::SeqCst);
    debug!(chain, ?observed, resume_order, "Chain resumed");

    ChainObservation {
        chain,
        observed,
        resume_order,
    }
}
