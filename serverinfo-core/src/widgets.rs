//! In-memory widget model written by the screens

use serde::Serialize;

/// Horizontal progress bar with a fixed 0..=100 range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressBar {
    progress: i32,
}

impl ProgressBar {
    pub const MAX: i32 = 100;

    pub fn with_progress(progress: i32) -> Self {
        let mut bar = Self::default();
        bar.set_progress(progress);
        bar
    }

    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress.clamp(0, Self::MAX);
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }
}

/// One storage volume: header text, usage bar and size line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageBlock {
    pub header: String,
    pub usage: ProgressBar,
    pub size_line: String,
}

/// One network interface: name and state line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkBlock {
    pub name: String,
    pub status: String,
}
