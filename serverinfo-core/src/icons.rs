//! Icon selection for the system screen
//!
//! Rules are evaluated top to bottom against the lowercased value and the
//! first substring hit wins. Order matters: fragments may overlap.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionIcon {
    Ubuntu,
    Debian,
    Raspbian,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuIcon {
    Amd,
    Intel,
    Broadcom,
    Generic,
}

const DISTRIBUTION_RULES: &[(&str, DistributionIcon)] = &[
    ("ubuntu", DistributionIcon::Ubuntu),
    ("debian", DistributionIcon::Debian),
    ("raspbian", DistributionIcon::Raspbian),
    ("raspberry", DistributionIcon::Raspbian),
];

const CPU_RULES: &[(&str, CpuIcon)] = &[
    ("amd", CpuIcon::Amd),
    ("intel", CpuIcon::Intel),
    ("bcm", CpuIcon::Broadcom),
];

fn first_match<T: Copy>(value: &str, rules: &[(&str, T)], fallback: T) -> T {
    let value = value.to_lowercase();
    rules
        .iter()
        .find(|(fragment, _)| value.contains(fragment))
        .map(|(_, icon)| *icon)
        .unwrap_or(fallback)
}

pub fn distribution_icon(distribution: &str) -> DistributionIcon {
    first_match(distribution, DISTRIBUTION_RULES, DistributionIcon::Default)
}

pub fn cpu_icon(hardware: &str) -> CpuIcon {
    first_match(hardware, CPU_RULES, CpuIcon::Generic)
}

impl DistributionIcon {
    pub fn name(self) -> &'static str {
        match self {
            DistributionIcon::Ubuntu => "ubuntu",
            DistributionIcon::Debian => "debian",
            DistributionIcon::Raspbian => "raspbian",
            DistributionIcon::Default => "linux",
        }
    }
}

impl CpuIcon {
    pub fn name(self) -> &'static str {
        match self {
            CpuIcon::Amd => "amd",
            CpuIcon::Intel => "intel",
            CpuIcon::Broadcom => "broadcom",
            CpuIcon::Generic => "cpu",
        }
    }
}
