//! ServerInfo core - fetch, schedule and render pipeline
//!
//! Two screens poll the same metrics endpoint:
//! - Hardware: CPU/RAM gauges, storage volumes and network interfaces, every 5s
//! - System: OS, kernel, uptime, CPU identity and device counts, every 1s
//!
//! Each screen runs a [`Poller`] that resolves the endpoint address, fetches
//! one JSON [`Snapshot`], and renders it into the screen's widget model held
//! by a [`RenderTarget`]. Transport, parse and shape failures are logged and
//! skipped; the loop never stops on its own.

pub mod error;
pub mod fetcher;
pub mod format;
pub mod icons;
pub mod labels;
pub mod poller;
pub mod render;
pub mod resolver;
pub mod screens;
pub mod snapshot;
pub mod widgets;

pub use error::{FetchError, ShapeError};
pub use fetcher::{HttpFetcher, SnapshotSource};
pub use labels::Labels;
pub use poller::{Poller, PollerHandle, PollerStats};
pub use render::RenderTarget;
pub use resolver::{EndpointResolver, FixedAddress};
pub use screens::{render_tick, HardwareView, RenderContext, SystemView, TickOutcome, ViewUpdater};
pub use snapshot::Snapshot;
