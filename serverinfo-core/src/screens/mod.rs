//! Screens: turn one snapshot into widget updates
//!
//! Each screen splits its update into two phases. `extract` reads every
//! field it needs from the snapshot and formats the display values; any
//! missing or mistyped field fails the whole extraction. `apply` then writes
//! the result into the view and cannot fail. A shape failure therefore leaves
//! the previously rendered widgets untouched.

pub mod hardware;
pub mod system;

use crate::error::ShapeError;
use crate::labels::Labels;
use crate::render::RenderTarget;
use crate::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub use hardware::HardwareView;
pub use system::SystemView;

/// Inputs besides the snapshot that a render pass depends on
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub labels: Arc<Labels>,
    pub now: DateTime<Utc>,
}

impl RenderContext {
    pub fn new(labels: Arc<Labels>) -> Self {
        Self {
            labels,
            now: Utc::now(),
        }
    }

    pub fn at(labels: Arc<Labels>, now: DateTime<Utc>) -> Self {
        Self { labels, now }
    }
}

/// A screen's widget tree and how to fill it from a snapshot
pub trait ViewUpdater: Send + 'static {
    /// Screen name used in logs
    const SCREEN: &'static str;

    /// Delay between the end of one poll and the start of the next
    const PERIOD: Duration;

    /// Everything `apply` writes, extracted up front
    type Model: Send;

    fn extract(snapshot: &Snapshot, ctx: &RenderContext) -> Result<Self::Model, ShapeError>;

    fn apply(&mut self, model: Self::Model);
}

/// What happened to the screen during one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Widgets were rewritten from the snapshot
    Rendered,
    /// Fetch produced nothing, widgets untouched
    NoSnapshot,
    /// Snapshot lacked a required field, widgets untouched
    ShapeFailure,
    /// Screen already torn down, nothing written
    Detached,
}

/// Render an optional snapshot into a target. Shape errors are logged and
/// swallowed here.
pub fn render_tick<V: ViewUpdater>(
    target: &RenderTarget<V>,
    snapshot: Option<&Snapshot>,
    ctx: &RenderContext,
) -> TickOutcome {
    if !target.is_live() {
        return TickOutcome::Detached;
    }

    let Some(snapshot) = snapshot else {
        return TickOutcome::NoSnapshot;
    };

    match V::extract(snapshot, ctx) {
        Ok(model) => {
            if target.write(|view| view.apply(model)) {
                TickOutcome::Rendered
            } else {
                TickOutcome::Detached
            }
        }
        Err(e) => {
            warn!(screen = V::SCREEN, "Skipping update: {}", e);
            TickOutcome::ShapeFailure
        }
    }
}
