//! System screen: OS, CPU identity and device counts
//!
//! Text fields are only overwritten when the snapshot carries a non-empty
//! value; counts and icons are always refreshed.

use super::{RenderContext, ViewUpdater};
use crate::error::ShapeError;
use crate::format::{boot_timestamp_ms, format_uptime, uptime_millis};
use crate::icons::{cpu_icon, distribution_icon, CpuIcon, DistributionIcon};
use crate::snapshot::{JsonObjectExt, Snapshot};
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

const CORE_KEY_PREFIX: &str = "core_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemView {
    pub distribution: String,
    pub kernel: String,
    pub uptime: String,
    pub cpu_name: String,
    pub cpu_architecture: String,
    pub cpu_type: String,
    pub cpu_cores: String,
    pub network_devices: String,
    pub distribution_icon: DistributionIcon,
    pub cpu_icon: CpuIcon,
}

impl Default for SystemView {
    fn default() -> Self {
        Self {
            distribution: String::new(),
            kernel: String::new(),
            uptime: String::new(),
            cpu_name: String::new(),
            cpu_architecture: String::new(),
            cpu_type: String::new(),
            cpu_cores: String::new(),
            network_devices: String::new(),
            distribution_icon: DistributionIcon::Default,
            cpu_icon: CpuIcon::Generic,
        }
    }
}

/// Display values for one system-screen tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemModel {
    pub distribution: Option<String>,
    pub kernel: Option<String>,
    pub uptime: Option<String>,
    pub cpu_name: Option<String>,
    pub cpu_architecture: Option<String>,
    pub cpu_type: Option<String>,
    pub cpu_cores: String,
    pub network_devices: String,
    pub distribution_icon: DistributionIcon,
    pub cpu_icon: CpuIcon,
}

fn labelled(label: &str, value: &str) -> Option<String> {
    (!value.is_empty()).then(|| format!("{label} {value}"))
}

impl ViewUpdater for SystemView {
    const SCREEN: &'static str = "system";

    const PERIOD: Duration = Duration::from_millis(1000);

    type Model = SystemModel;

    fn extract(snapshot: &Snapshot, ctx: &RenderContext) -> Result<SystemModel, ShapeError> {
        let labels = &ctx.labels;

        let os = snapshot.section("os")?;
        let distribution = os.get_string("distribution")?;
        let kernel = os.get_string("kernel_version")?;
        let uptime_raw = os.get_string("uptime")?;

        let cpu = snapshot.section("cpu")?;
        let cores = cpu.get_object("cores")?;
        let hardware = cpu.get_string("hardware")?;
        let architecture = cpu.get_string("architecture")?;
        let architecture_type = cpu.get_string("architecture_type")?;
        let cpu_type = cpu.get_string("type")?;

        let network_count = snapshot.section("network")?.len();
        let core_count = cores
            .keys()
            .filter(|key| key.starts_with(CORE_KEY_PREFIX))
            .count();

        // uptime carries the boot timestamp, not an elapsed duration.
        // An unparseable value keeps the previous text; the rest still renders.
        let uptime = if uptime_raw.is_empty() {
            None
        } else {
            match boot_timestamp_ms(&uptime_raw) {
                Ok(boot_ms) => {
                    let formatted = format_uptime(uptime_millis(boot_ms, ctx.now));
                    Some(format!("{} {formatted}", labels.uptime))
                }
                Err(e) => {
                    warn!(screen = Self::SCREEN, "Keeping previous uptime: {}", e);
                    None
                }
            }
        };

        let cpu_architecture = (!architecture.is_empty()).then(|| {
            format!("{} {architecture_type} - {architecture}", labels.architecture)
        });

        Ok(SystemModel {
            distribution: labelled(&labels.distribution, &distribution),
            kernel: labelled(&labels.kernel, &kernel),
            uptime,
            cpu_name: labelled(&labels.cpu, &hardware),
            cpu_architecture,
            cpu_type: labelled(&labels.cpu_type, &cpu_type),
            cpu_cores: format!("{} {core_count}", labels.cores),
            network_devices: format!("{} {network_count}", labels.network_devices),
            distribution_icon: distribution_icon(&distribution),
            cpu_icon: cpu_icon(&hardware),
        })
    }

    fn apply(&mut self, model: SystemModel) {
        let replace = |slot: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *slot = value;
            }
        };

        replace(&mut self.distribution, model.distribution);
        replace(&mut self.kernel, model.kernel);
        replace(&mut self.uptime, model.uptime);
        replace(&mut self.cpu_name, model.cpu_name);
        replace(&mut self.cpu_architecture, model.cpu_architecture);
        replace(&mut self.cpu_type, model.cpu_type);
        self.cpu_cores = model.cpu_cores;
        self.network_devices = model.network_devices;
        self.distribution_icon = model.distribution_icon;
        self.cpu_icon = model.cpu_icon;
    }
}
