//! Patch collection with a render/rebuild gate
//!
//! All live patches sit behind a single [`parking_lot::RwLock`]: render
//! and pick passes take the shared read scope, while uploads, rebuilds,
//! insertions and removals take the exclusive write scope. This replaces
//! any notion of a global lock with scoped access to the one resource
//! that is actually contended, the patch table itself.

use std::collections::HashMap;

use glam::Vec3;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use bv_core::{BoxConfig, BoxPatch, ConfigError};

use crate::patch::{GpuPatch, PatchRenderer};

/// A stored patch and its GPU upload, if any.
///
/// The `Option` is the initialization guard: `None` means not yet
/// uploaded (or invalidated by a rebuild), and upload never runs twice
/// for the same slot.
pub struct PatchEntry {
    /// CPU-side geometry and display state.
    pub patch: BoxPatch,
    /// GPU buffers, present once uploaded.
    pub gpu: Option<GpuPatch>,
}

/// The table guarded by the store's read/write gate.
#[derive(Default)]
pub struct PatchTable {
    entries: HashMap<Uuid, PatchEntry>,
    selected: Option<Uuid>,
}

impl PatchTable {
    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &PatchEntry)> {
        self.entries.iter()
    }

    /// Look up an entry.
    pub fn get(&self, id: Uuid) -> Option<&PatchEntry> {
        self.entries.get(&id)
    }

    /// Look up an entry mutably.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut PatchEntry> {
        self.entries.get_mut(&id)
    }

    /// The currently selected patch, if any.
    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    /// Change the selection, updating the patches' `selected` flags.
    ///
    /// Returns the `(id, selected)` transitions so the caller can refresh
    /// the GPU colors of affected uploads.
    pub fn select(&mut self, id: Option<Uuid>) -> Vec<(Uuid, bool)> {
        let mut changed = Vec::new();
        if self.selected == id {
            return changed;
        }
        if let Some(prev) = self.selected
            && let Some(entry) = self.entries.get_mut(&prev)
        {
            entry.patch.selected = false;
            changed.push((prev, false));
        }
        self.selected = id;
        if let Some(next) = id
            && let Some(entry) = self.entries.get_mut(&next)
        {
            entry.patch.selected = true;
            changed.push((next, true));
        }
        changed
    }
}

/// Thread-safe patch collection.
pub struct PatchStore {
    inner: RwLock<PatchTable>,
}

impl Default for PatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PatchTable::default()),
        }
    }

    /// Add a patch, returning its handle.
    pub fn insert(&self, patch: BoxPatch) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().entries.insert(
            id,
            PatchEntry { patch, gpu: None },
        );
        tracing::debug!(%id, "patch inserted");
        id
    }

    /// Remove a patch, returning its CPU-side geometry. GPU buffers are
    /// released when the entry drops.
    pub fn remove(&self, id: Uuid) -> Option<BoxPatch> {
        let mut table = self.inner.write();
        if table.selected == Some(id) {
            table.selected = None;
        }
        table.entries.remove(&id).map(|entry| entry.patch)
    }

    /// Number of stored patches.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the store holds no patches.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Shared access for a render or pick pass. Rebuilds block until all
    /// readers are done.
    pub fn render_scope(&self) -> RwLockReadGuard<'_, PatchTable> {
        self.inner.read()
    }

    /// Exclusive access for mutation outside the provided helpers.
    pub fn rebuild_scope(&self) -> RwLockWriteGuard<'_, PatchTable> {
        self.inner.write()
    }

    /// Upload every patch that has no GPU buffers yet. Idempotent: already
    /// uploaded entries are left alone.
    pub fn upload_all(&self, device: &wgpu::Device, renderer: &PatchRenderer) {
        let mut table = self.inner.write();
        for entry in table.entries.values_mut() {
            if entry.gpu.is_none() {
                entry.gpu = Some(GpuPatch::upload(device, renderer, &entry.patch));
            }
        }
    }

    /// Change the selection and refresh affected GPU colors.
    pub fn set_selected(&self, queue: &wgpu::Queue, id: Option<Uuid>) {
        let mut table = self.inner.write();
        for (changed_id, selected) in table.select(id) {
            if let Some(entry) = table.get(changed_id)
                && let Some(gpu) = &entry.gpu
            {
                gpu.set_selected(queue, selected);
            }
        }
    }

    /// Rebuild one patch's geometry for a new configuration, invalidating
    /// its GPU upload.
    pub fn set_resolution(&self, id: Uuid, config: BoxConfig) -> Result<(), ConfigError> {
        let mut table = self.inner.write();
        if let Some(entry) = table.get_mut(id) {
            entry.patch.set_resolution(config)?;
            entry.gpu = None;
        }
        Ok(())
    }

    /// Pick the patch whose surface the ray hits closest to `start`.
    ///
    /// Per-patch intersection reports the first accepted hit in face
    /// enumeration order; between patches the smallest parameter wins.
    pub fn pick(&self, start: Vec3, end: Vec3) -> Option<(Uuid, f32)> {
        let table = self.inner.read();
        let mut best: Option<(Uuid, f32)> = None;
        for (&id, entry) in table.iter() {
            if let Some(t) = entry.patch.intersect(start, end)
                && best.is_none_or(|(_, bt)| t < bt)
            {
                best = Some((id, t));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch_at(center: Vec3) -> BoxPatch {
        BoxPatch::new(center, BoxConfig::new([1, 1, 1], 1).unwrap()).unwrap()
    }

    #[test]
    fn insert_and_remove() {
        let store = PatchStore::new();
        assert!(store.is_empty());
        let id = store.insert(patch_at(Vec3::ZERO));
        assert_eq!(store.len(), 1);
        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn selection_transitions() {
        let store = PatchStore::new();
        let a = store.insert(patch_at(Vec3::ZERO));
        let b = store.insert(patch_at(Vec3::new(5.0, 0.0, 0.0)));

        let mut table = store.rebuild_scope();
        assert_eq!(table.select(Some(a)), vec![(a, true)]);
        assert!(table.get(a).unwrap().patch.selected);

        let changed = table.select(Some(b));
        assert_eq!(changed, vec![(a, false), (b, true)]);
        assert!(!table.get(a).unwrap().patch.selected);
        assert!(table.get(b).unwrap().patch.selected);

        assert_eq!(table.select(Some(b)), vec![]);
        assert_eq!(table.select(None), vec![(b, false)]);
    }

    #[test]
    fn removing_selected_clears_selection() {
        let store = PatchStore::new();
        let id = store.insert(patch_at(Vec3::ZERO));
        store.rebuild_scope().select(Some(id));
        store.remove(id);
        assert_eq!(store.render_scope().selected(), None);
    }

    #[test]
    fn pick_prefers_the_nearer_patch() {
        let store = PatchStore::new();
        let near = store.insert(patch_at(Vec3::new(0.0, 0.0, -3.0)));
        let _far = store.insert(patch_at(Vec3::new(0.0, 0.0, 3.0)));

        let (hit, t) = store
            .pick(
                Vec3::new(0.1, 0.1, -10.0),
                Vec3::new(0.1, 0.1, 10.0),
            )
            .expect("ray pierces both patches");
        assert_eq!(hit, near);
        assert!(t > 0.0 && t < 1.0);
    }

    #[test]
    fn pick_misses_cleanly() {
        let store = PatchStore::new();
        store.insert(patch_at(Vec3::ZERO));
        assert_eq!(
            store.pick(Vec3::new(5.0, 5.0, 5.0), Vec3::new(6.0, 6.0, 6.0)),
            None
        );
    }

    #[test]
    fn rebuild_invalidates_nothing_when_unuploaded() {
        let store = PatchStore::new();
        let id = store.insert(patch_at(Vec3::ZERO));
        store
            .set_resolution(id, BoxConfig::new([2, 2, 2], 2).unwrap())
            .unwrap();
        let table = store.render_scope();
        let entry = table.get(id).unwrap();
        assert!(entry.gpu.is_none());
        assert_eq!(entry.patch.config().template, [2, 2, 2]);
    }
}
