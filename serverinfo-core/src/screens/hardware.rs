//! Hardware screen: CPU, RAM, storage volumes and network interfaces
//!
//! Every widget on this screen is rewritten each tick, so the extracted model
//! is simply the next view.

use super::{RenderContext, ViewUpdater};
use crate::error::ShapeError;
use crate::format::{decimal_progress, percent_progress, storage_progress};
use crate::labels::Labels;
use crate::snapshot::{object_at, JsonObjectExt, Snapshot};
use crate::widgets::{NetworkBlock, ProgressBar, StorageBlock};
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HardwareView {
    pub cpu_usage: String,
    pub cpu_usage_bar: ProgressBar,
    pub cpu_temperature: String,
    pub cpu_temperature_bar: ProgressBar,
    pub cpu_speed: String,
    pub ram_used: String,
    pub ram_free: String,
    pub ram_total: String,
    pub ram_percent: String,
    pub ram_bar: ProgressBar,
    pub storage: Vec<StorageBlock>,
    pub network: Vec<NetworkBlock>,
}

impl ViewUpdater for HardwareView {
    const SCREEN: &'static str = "hardware";

    const PERIOD: Duration = Duration::from_millis(5000);

    type Model = HardwareView;

    fn extract(snapshot: &Snapshot, ctx: &RenderContext) -> Result<HardwareView, ShapeError> {
        let labels = &ctx.labels;

        let cpu = snapshot.section("cpu")?;
        let cpu_usage = cpu.get_string("usage")?;
        let cpu_temperature = cpu.get_string("temperature")?;
        let cpu_speed = cpu.get_string("speed")?;

        let ram = snapshot.section("ram")?;
        let ram_used = ram.get_string("used")?;
        let ram_free = ram.get_string("free")?;
        let ram_total = ram.get_string("total")?;
        let ram_percent = ram.get_string("usage_percent")?;

        let storage = storage_blocks(snapshot.list("storage")?, labels)?;
        let network = network_blocks(snapshot.section("network")?, labels)?;

        Ok(HardwareView {
            cpu_usage_bar: ProgressBar::with_progress(decimal_progress(&cpu_usage)),
            cpu_temperature_bar: ProgressBar::with_progress(decimal_progress(&cpu_temperature)),
            cpu_usage,
            cpu_temperature: format!("{cpu_temperature}℃"),
            cpu_speed: format!("{} {cpu_speed}", labels.speed),
            ram_used: format!("{} {ram_used}", labels.ram_used),
            ram_free: format!("{} {ram_free}", labels.ram_free),
            ram_total: format!("{} {ram_total}", labels.ram_total),
            ram_bar: ProgressBar::with_progress(percent_progress(&ram_percent)),
            ram_percent,
            storage,
            network,
        })
    }

    fn apply(&mut self, model: HardwareView) {
        *self = model;
    }
}

fn storage_blocks(volumes: &[Value], labels: &Labels) -> Result<Vec<StorageBlock>, ShapeError> {
    let mut blocks = Vec::with_capacity(volumes.len());

    for index in 0..volumes.len() {
        let volume = object_at(volumes, "storage", index)?;
        let name = volume.get_string("name")?;
        let usage_percent = volume.get_string("usage_percent")?;
        let used = volume.get_string("used")?;
        let size = volume.get_string("size")?;
        let mountpoint = volume.get_string("mountpoint")?;
        let fstype = volume.get_string("fstype")?;

        blocks.push(StorageBlock {
            header: format!(
                "{name} \n{} {mountpoint}\n{} {fstype}",
                labels.mounted_at, labels.fs
            ),
            usage: ProgressBar::with_progress(storage_progress(&usage_percent)),
            size_line: format!("{} {used} {} {size}", labels.used_storage, labels.of_storage),
        });
    }

    Ok(blocks)
}

fn network_blocks(
    interfaces: &Map<String, Value>,
    labels: &Labels,
) -> Result<Vec<NetworkBlock>, ShapeError> {
    interfaces
        .iter()
        .map(|(name, _)| {
            let interface = interfaces.get_object(name)?;
            let is_up = interface.get_bool("is_up")?;
            let speed = interface.get_string("speed")?;

            Ok(NetworkBlock {
                name: name.clone(),
                status: format!("{} {is_up}\n{} {speed}", labels.running, labels.speed),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderTarget;
    use crate::screens::{render_tick, TickOutcome};
    use serde_json::json;
    use std::sync::Arc;

    fn ctx() -> RenderContext {
        RenderContext::new(Arc::new(Labels::default()))
    }

    fn snapshot(value: Value) -> Snapshot {
        Snapshot::from_value(value).unwrap()
    }

    fn sample() -> Snapshot {
        snapshot(json!({
            "cpu": {"usage": "73.482931", "temperature": "48.5", "speed": "3.40 GHz"},
            "ram": {"used": "5.1 GB", "free": "10.5 GB", "total": "15.6 GB", "usage_percent": "33%"},
            "storage": [
                {"name": "/dev/sda1", "usage_percent": "42.7%", "used": "120G", "size": "256G",
                 "mountpoint": "/", "fstype": "ext4"}
            ],
            "network": {
                "eth0": {"is_up": true, "speed": "1000 Mb/s"},
                "wlan0": {"is_up": false, "speed": "0 Mb/s"}
            }
        }))
    }

    #[test]
    fn test_extract_formats_every_widget() {
        let view = HardwareView::extract(&sample(), &ctx()).unwrap();

        assert_eq!(view.cpu_usage, "73.482931");
        assert_eq!(view.cpu_usage_bar.progress(), 73);
        assert_eq!(view.cpu_temperature, "48.5℃");
        assert_eq!(view.cpu_temperature_bar.progress(), 48);
        assert_eq!(view.cpu_speed, "Speed: 3.40 GHz");
        assert_eq!(view.ram_used, "Used: 5.1 GB");
        assert_eq!(view.ram_free, "Free: 10.5 GB");
        assert_eq!(view.ram_total, "Total: 15.6 GB");
        assert_eq!(view.ram_percent, "33%");
        assert_eq!(view.ram_bar.progress(), 33);

        assert_eq!(view.storage.len(), 1);
        assert_eq!(view.storage[0].header, "/dev/sda1 \nMounted at: /\nFS: ext4");
        assert_eq!(view.storage[0].usage.progress(), 42);
        assert_eq!(view.storage[0].size_line, "Used: 120G of: 256G");

        assert_eq!(view.network.len(), 2);
        assert_eq!(view.network[0].name, "eth0");
        assert_eq!(view.network[0].status, "Running: true\nSpeed: 1000 Mb/s");
        assert_eq!(view.network[1].name, "wlan0");
        assert_eq!(view.network[1].status, "Running: false\nSpeed: 0 Mb/s");
    }

    #[test]
    fn test_non_numeric_values_default_to_zero() {
        let snap = snapshot(json!({
            "cpu": {"usage": "n/a", "temperature": "unknown", "speed": "?"},
            "ram": {"used": "-", "free": "-", "total": "-", "usage_percent": "lots"},
            "storage": [{"name": "tmpfs", "usage_percent": "?", "used": "0", "size": "0",
                         "mountpoint": "/run", "fstype": "tmpfs"}],
            "network": {}
        }));
        let view = HardwareView::extract(&snap, &ctx()).unwrap();
        assert_eq!(view.cpu_usage_bar.progress(), 0);
        assert_eq!(view.cpu_temperature_bar.progress(), 0);
        assert_eq!(view.ram_bar.progress(), 0);
        assert_eq!(view.storage[0].usage.progress(), 0);
        assert!(view.network.is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let target = RenderTarget::new(HardwareView::default());
        let snap = sample();
        let ctx = ctx();

        assert_eq!(render_tick(&target, Some(&snap), &ctx), TickOutcome::Rendered);
        let first = target.cloned_view().unwrap();
        assert_eq!(render_tick(&target, Some(&snap), &ctx), TickOutcome::Rendered);
        assert_eq!(target.cloned_view().unwrap(), first);
    }

    #[test]
    fn test_missing_ram_keeps_previous_values() {
        let target = RenderTarget::new(HardwareView::default());
        let ctx = ctx();
        render_tick(&target, Some(&sample()), &ctx);

        let mut value = sample().root().clone();
        value.remove("ram");
        value.insert("cpu".into(), json!({"usage": "5.0", "temperature": "30.0", "speed": "1 GHz"}));
        let broken = snapshot(Value::Object(value));

        assert_eq!(render_tick(&target, Some(&broken), &ctx), TickOutcome::ShapeFailure);
        let view = target.cloned_view().unwrap();
        assert_eq!(view.cpu_usage, "73.482931");
        assert_eq!(view.cpu_usage_bar.progress(), 73);
        assert_eq!(view.storage.len(), 1);
    }

    #[test]
    fn test_broken_network_entry_aborts_tick() {
        let mut value = sample().root().clone();
        value.insert("network".into(), json!({"eth0": {"is_up": "maybe", "speed": "1 Gb/s"}}));
        let err = HardwareView::extract(&snapshot(Value::Object(value)), &ctx()).unwrap_err();
        assert!(matches!(err, ShapeError::WrongType { .. }));
    }

    #[test]
    fn test_blocks_are_rebuilt_each_tick() {
        let target = RenderTarget::new(HardwareView::default());
        let ctx = ctx();
        render_tick(&target, Some(&sample()), &ctx);

        let mut value = sample().root().clone();
        value.insert("storage".into(), json!([]));
        value.insert("network".into(), json!({"lo": {"is_up": true, "speed": "unknown"}}));
        render_tick(&target, Some(&snapshot(Value::Object(value))), &ctx);

        let view = target.cloned_view().unwrap();
        assert!(view.storage.is_empty());
        assert_eq!(view.network.len(), 1);
        assert_eq!(view.network[0].name, "lo");
    }

    #[test]
    fn test_absent_snapshot_is_a_no_op() {
        let target = RenderTarget::new(HardwareView::default());
        assert_eq!(render_tick(&target, None, &ctx()), TickOutcome::NoSnapshot);
        assert_eq!(target.revision(), 0);
    }
}
