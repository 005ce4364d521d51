//! Inventory of per-step frames in a local directory that mirrors the bucket.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, SceneError};
use crate::image_url::{FrameLocation, parse_frame_path};
use crate::state::StepRange;
use crate::view::ViewTree;

type SceneKey = (String, String, usize);

/// Steps found on disk, keyed by block, test and scene.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInventory {
    root: PathBuf,
    scenes: BTreeMap<SceneKey, BTreeSet<u32>>,
}

impl FrameInventory {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Number of frame files recognised.
    pub fn frame_count(&self) -> usize {
        self.scenes.values().map(BTreeSet::len).sum()
    }

    pub fn steps(&self, block: &str, test: &str, scene: usize) -> Option<&BTreeSet<u32>> {
        self.scenes.get(&(block.to_string(), test.to_string(), scene))
    }

    /// Smallest and largest step recorded for any scene of `block`/`test`.
    pub fn step_range(&self, block: &str, test: &str) -> Option<StepRange> {
        let mut lo: Option<u32> = None;
        let mut hi: Option<u32> = None;
        for ((b, t, _), steps) in &self.scenes {
            if b != block || t != test {
                continue;
            }
            if let (Some(first), Some(last)) = (steps.first(), steps.last()) {
                lo = Some(lo.map_or(*first, |v| v.min(*first)));
                hi = Some(hi.map_or(*last, |v| v.max(*last)));
            }
        }
        StepRange::new(lo?, hi?).ok()
    }

    /// Image URLs of `view` that have no matching frame on disk.
    pub fn missing(&self, view: &ViewTree) -> Vec<String> {
        view.scenes
            .iter()
            .filter(|s| {
                !self
                    .steps(&s.image.block, &s.image.test, s.scene)
                    .is_some_and(|steps| steps.contains(&view.step))
            })
            .map(|s| s.image_url.clone())
            .collect()
    }

    fn insert(&mut self, loc: FrameLocation) {
        self.scenes
            .entry((loc.block, loc.test, loc.scene))
            .or_default()
            .insert(loc.step);
    }
}

/// Walk `root` and collect every `{block}/{test}/{scene}/scene/scene_{step}.png`.
pub fn scan_frames(root: impl AsRef<Path>) -> Result<FrameInventory> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(SceneError::MissingFramesRoot(root.to_path_buf()));
    }

    let mut inventory = FrameInventory {
        root: root.to_path_buf(),
        ..FrameInventory::default()
    };

    for entry in WalkDir::new(root).min_depth(5).max_depth(5) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("walkdir error: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let Some(relative) = relative.to_str() else {
            tracing::warn!("skipping non UTF-8 path {}", entry.path().display());
            continue;
        };
        if let Some(loc) = parse_frame_path(relative) {
            inventory.insert(loc);
        }
    }

    tracing::info!(
        "found {} frames for {} scenes under {}",
        inventory.frame_count(),
        inventory.scenes.len(),
        root.display()
    );
    Ok(inventory)
}
