//! Label strings prefixed to displayed values
//!
//! Wording is presentation; where a label is glued to a value is not, and
//! that part lives in the screens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub distribution: String,
    pub kernel: String,
    pub uptime: String,
    pub cpu: String,
    pub architecture: String,
    pub cpu_type: String,
    pub cores: String,
    pub network_devices: String,
    pub speed: String,
    pub running: String,
    pub mounted_at: String,
    pub fs: String,
    pub used_storage: String,
    pub of_storage: String,
    pub ram_used: String,
    pub ram_free: String,
    pub ram_total: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            distribution: "Distribution:".to_string(),
            kernel: "Kernel:".to_string(),
            uptime: "Uptime:".to_string(),
            cpu: "CPU:".to_string(),
            architecture: "Architecture:".to_string(),
            cpu_type: "Type:".to_string(),
            cores: "Cores:".to_string(),
            network_devices: "Network devices:".to_string(),
            speed: "Speed:".to_string(),
            running: "Running:".to_string(),
            mounted_at: "Mounted at:".to_string(),
            fs: "FS:".to_string(),
            used_storage: "Used:".to_string(),
            of_storage: "of:".to_string(),
            ram_used: "Used:".to_string(),
            ram_free: "Free:".to_string(),
            ram_total: "Total:".to_string(),
        }
    }
}
