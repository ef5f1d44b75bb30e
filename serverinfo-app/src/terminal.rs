//! Plain-text rendering of the screens on stdout
//!
//! Each screen prints as a block of lines after every revision of its render
//! target. Logs go to stderr so the two never interleave on one stream.

use serverinfo_core::widgets::ProgressBar;
use serverinfo_core::{HardwareView, RenderTarget, SystemView, ViewUpdater};
use std::fmt::Write as _;
use std::future::Future;
use std::io::Write;
use tracing::debug;

const BAR_CELLS: i32 = 10;

/// `[#####.....] 50`
pub fn format_bar(bar: &ProgressBar) -> String {
    let filled = (bar.progress() * BAR_CELLS / ProgressBar::MAX) as usize;
    let empty = BAR_CELLS as usize - filled;
    format!("[{}{}] {}", "#".repeat(filled), ".".repeat(empty), bar.progress())
}

/// Text form of a screen's widget tree
pub trait ScreenText {
    fn to_text(&self) -> String;
}

impl ScreenText for HardwareView {
    fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "CPU {} {}", self.cpu_usage, format_bar(&self.cpu_usage_bar));
        let _ = writeln!(out, "{} {}", self.cpu_temperature, format_bar(&self.cpu_temperature_bar));
        let _ = writeln!(out, "{}", self.cpu_speed);
        let _ = writeln!(out, "RAM {} {}", self.ram_percent, format_bar(&self.ram_bar));
        let _ = writeln!(out, "{}", self.ram_used);
        let _ = writeln!(out, "{}", self.ram_free);
        let _ = writeln!(out, "{}", self.ram_total);

        for block in &self.storage {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", block.header);
            let _ = writeln!(out, "{}", format_bar(&block.usage));
            let _ = writeln!(out, "{}", block.size_line);
        }

        for block in &self.network {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", block.name);
            let _ = writeln!(out, "{}", block.status);
        }

        out
    }
}

impl ScreenText for SystemView {
    fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[{}] {}", self.distribution_icon.name(), self.distribution);
        let _ = writeln!(out, "{}", self.kernel);
        let _ = writeln!(out, "{}", self.uptime);
        let _ = writeln!(out, "[{}] {}", self.cpu_icon.name(), self.cpu_name);
        let _ = writeln!(out, "{}", self.cpu_architecture);
        let _ = writeln!(out, "{}", self.cpu_type);
        let _ = writeln!(out, "{}", self.cpu_cores);
        let _ = writeln!(out, "{}", self.network_devices);
        out
    }
}

/// Header line plus screen body
pub fn screen_block<V: ViewUpdater + ScreenText>(view: &V) -> String {
    format!("── {} ──\n{}", V::SCREEN, view.to_text())
}

/// Print the screen after every write until the target is invalidated.
/// Subscribes before returning, so no write made after the call is missed.
pub fn follow<V>(target: RenderTarget<V>) -> impl Future<Output = ()> + Send
where
    V: ViewUpdater + ScreenText,
{
    let mut revisions = target.subscribe();

    async move {
        while target.is_live() && revisions.changed().await.is_ok() {
            let Some(text) = target.read(screen_block) else {
                break;
            };
            print_block(&text);
        }

        debug!(screen = V::SCREEN, "Terminal renderer stopped");
    }
}

pub fn print_block(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{text}");
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serverinfo_core::icons::{CpuIcon, DistributionIcon};
    use serverinfo_core::widgets::{NetworkBlock, StorageBlock};

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(&ProgressBar::with_progress(50)), "[#####.....] 50");
        assert_eq!(format_bar(&ProgressBar::with_progress(0)), "[..........] 0");
        assert_eq!(format_bar(&ProgressBar::with_progress(100)), "[##########] 100");
        assert_eq!(format_bar(&ProgressBar::with_progress(73)), "[#######...] 73");
    }

    #[test]
    fn test_hardware_text_keeps_block_order() {
        let view = HardwareView {
            cpu_usage: "12.5".to_string(),
            cpu_usage_bar: ProgressBar::with_progress(12),
            storage: vec![StorageBlock {
                header: "/dev/sda1 \nMounted at: /\nFS: ext4".to_string(),
                usage: ProgressBar::with_progress(40),
                size_line: "Used: 4G of: 10G".to_string(),
            }],
            network: vec![
                NetworkBlock {
                    name: "wlan0".to_string(),
                    status: "Running: true\nSpeed: 72 Mb/s".to_string(),
                },
                NetworkBlock {
                    name: "eth0".to_string(),
                    status: "Running: false\nSpeed: 0".to_string(),
                },
            ],
            ..HardwareView::default()
        };

        let text = view.to_text();
        assert!(text.starts_with("CPU 12.5 [#.........] 12\n"));
        assert!(text.contains("FS: ext4\n[####......] 40\nUsed: 4G of: 10G\n"));
        let wlan = text.find("wlan0").unwrap();
        let eth = text.find("eth0").unwrap();
        assert!(wlan < eth);
    }

    #[test]
    fn test_system_block_shows_icons() {
        let view = SystemView {
            distribution: "Distribution: Debian GNU/Linux 12".to_string(),
            cpu_name: "CPU: BCM2835".to_string(),
            distribution_icon: DistributionIcon::Debian,
            cpu_icon: CpuIcon::Broadcom,
            ..SystemView::default()
        };

        let block = screen_block(&view);
        assert!(block.starts_with("── system ──\n"));
        assert!(block.contains("[debian] Distribution: Debian GNU/Linux 12\n"));
        assert!(block.contains(&format!("[{}] CPU: BCM2835\n", CpuIcon::Broadcom.name())));
    }

    #[tokio::test]
    async fn test_follow_stops_on_invalidate() {
        let target = RenderTarget::new(SystemView::default());
        let follower = tokio::spawn(follow(target.clone()));

        target.write(|view| view.kernel = "Kernel: 6.1".to_string());
        target.invalidate();

        tokio::time::timeout(std::time::Duration::from_secs(2), follower)
            .await
            .unwrap()
            .unwrap();
    }
}
