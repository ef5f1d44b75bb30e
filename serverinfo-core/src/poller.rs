//! Scheduler: fetch -> render, repeated for the lifetime of a screen
//!
//! The first poll runs immediately. After each poll the task sleeps for the
//! screen period, so a slow fetch pushes later polls back and two polls of the
//! same screen never overlap. Failures are logged and the loop carries on at
//! the same period.
//!
//! The task lives as long as its [`PollerHandle`]. Cancelling or dropping the
//! handle invalidates the render target first (no write can happen after
//! that) and then aborts the task, dropping any fetch still in flight.

use crate::fetcher::SnapshotSource;
use crate::labels::Labels;
use crate::render::RenderTarget;
use crate::resolver::EndpointResolver;
use crate::screens::{render_tick, RenderContext, TickOutcome, ViewUpdater};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Tick counters for one poller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollerStats {
    pub ticks: u64,
    pub rendered: u64,
    pub no_snapshot: u64,
    pub shape_failures: u64,
}

#[derive(Default)]
struct Counters {
    ticks: AtomicU64,
    rendered: AtomicU64,
    no_snapshot: AtomicU64,
    shape_failures: AtomicU64,
}

impl Counters {
    fn record(&self, outcome: TickOutcome) {
        let counter = match outcome {
            TickOutcome::Rendered => &self.rendered,
            TickOutcome::NoSnapshot => &self.no_snapshot,
            TickOutcome::ShapeFailure => &self.shape_failures,
            TickOutcome::Detached => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    fn stats(&self) -> PollerStats {
        PollerStats {
            ticks: self.ticks.load(Ordering::Relaxed),
            rendered: self.rendered.load(Ordering::Relaxed),
            no_snapshot: self.no_snapshot.load(Ordering::Relaxed),
            shape_failures: self.shape_failures.load(Ordering::Relaxed),
        }
    }
}

/// Fetch/render loop for one screen
pub struct Poller<V: ViewUpdater> {
    source: Arc<dyn SnapshotSource>,
    resolver: Arc<dyn EndpointResolver>,
    labels: Arc<Labels>,
    period: Duration,
    target: RenderTarget<V>,
}

impl<V: ViewUpdater> Poller<V> {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        resolver: Arc<dyn EndpointResolver>,
        target: RenderTarget<V>,
    ) -> Self {
        Self {
            source,
            resolver,
            labels: Arc::new(Labels::default()),
            period: V::PERIOD,
            target,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_labels(mut self, labels: Arc<Labels>) -> Self {
        self.labels = labels;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn target(&self) -> &RenderTarget<V> {
        &self.target
    }

    /// One poll: resolve, fetch, render
    pub async fn tick(&self) -> TickOutcome {
        if !self.target.is_live() {
            return TickOutcome::Detached;
        }

        let url = self.resolver.api_address();
        let snapshot = self.source.fetch(&url).await;
        let ctx = RenderContext::new(Arc::clone(&self.labels));
        render_tick(&self.target, snapshot.as_ref(), &ctx)
    }

    /// Start the loop on the current tokio runtime
    pub fn spawn(self) -> PollerHandle<V> {
        let counters = Arc::new(Counters::default());
        let target = self.target.clone();
        let task = tokio::spawn(self.run(Arc::clone(&counters)));

        PollerHandle {
            task: Some(task),
            target,
            counters,
        }
    }

    async fn run(self, counters: Arc<Counters>) {
        info!(
            screen = V::SCREEN,
            period_ms = self.period.as_millis() as u64,
            "Poller started"
        );

        loop {
            let outcome = self.tick().await;
            debug!(screen = V::SCREEN, ?outcome, "Tick complete");

            if outcome == TickOutcome::Detached {
                break;
            }
            counters.record(outcome);

            tokio::time::sleep(self.period).await;
        }

        info!(screen = V::SCREEN, "Poller stopped");
    }
}

/// Owns a running poller; the screen scope
pub struct PollerHandle<V> {
    task: Option<JoinHandle<()>>,
    target: RenderTarget<V>,
    counters: Arc<Counters>,
}

impl<V> PollerHandle<V> {
    pub fn target(&self) -> &RenderTarget<V> {
        &self.target
    }

    pub fn stats(&self) -> PollerStats {
        self.counters.stats()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Tear the screen down. Returns once no further write can occur.
    pub fn cancel(&mut self) {
        self.target.invalidate();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<V> Drop for PollerHandle<V> {
    fn drop(&mut self) {
        self.cancel();
    }
}
