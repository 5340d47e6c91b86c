//! Optional dump of intermediate images.
//!
//! A disabled dump is a no-op. An enabled one writes numbered PNG files
//! `{seq:04}_{stage}.png` into its directory, creating it on first write.
//! Failures are logged and never abort recognition.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{GrayImage, RgbImage};

#[derive(Debug, Default)]
pub struct DebugDump {
    dir: Option<PathBuf>,
    seq: AtomicUsize,
}

impl DebugDump {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn to_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            seq: AtomicUsize::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn next_path(&self, stage: &str) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        if let Err(e) = std::fs::create_dir_all(dir) {
            log::warn!("debug dump: cannot create {}: {e}", dir.display());
            return None;
        }
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        Some(dir.join(format!("{seq:04}_{stage}.png")))
    }

    pub fn gray(&self, stage: &str, img: &GrayImage) {
        if let Some(path) = self.next_path(stage) {
            if let Err(e) = img.save(&path) {
                log::warn!("debug dump: cannot write {}: {e}", path.display());
            }
        }
    }

    pub fn rgb(&self, stage: &str, img: &RgbImage) {
        if let Some(path) = self.next_path(stage) {
            if let Err(e) = img.save(&path) {
                log::warn!("debug dump: cannot write {}: {e}", path.display());
            }
        }
    }
}
