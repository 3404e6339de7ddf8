use crate::adapter::DocumentAdapter;
use crate::models::LayerId;
use crate::visibility::{Resolution, SnapshotKey, VisibilitySnapshot, resolve_visibility};
use kurbo::Rect;
use std::ops::{Deref, DerefMut};

/// Scoped access to a document whose layer visibility may be mutated.
///
/// When created with [`VisibilityGuard::isolate`] the guard captures a
/// snapshot, resolves visibility for one artboard, and puts the captured
/// visibility back when released or dropped, including during unwinding.
pub struct VisibilityGuard<'a, D: DocumentAdapter> {
    document: &'a mut D,
    saved: Option<Saved>,
}

struct Saved {
    snapshot: VisibilitySnapshot,
    flat: Vec<LayerId>,
}

impl<'a, D: DocumentAdapter> VisibilityGuard<'a, D> {
    /// Guard that leaves visibility alone
    pub fn passthrough(document: &'a mut D) -> Self {
        Self {
            document,
            saved: None,
        }
    }

    /// Snapshot the current visibility, then show only layers with content
    /// on `artboard`
    pub fn isolate(document: &'a mut D, artboard: Rect, key: SnapshotKey) -> (Self, Resolution) {
        let flat = document.layers().flatten();
        let snapshot = VisibilitySnapshot::capture(document.layers(), &flat, key);
        let resolution = resolve_visibility(document.layers_mut(), artboard);
        let guard = Self {
            document,
            saved: Some(Saved { snapshot, flat }),
        };
        (guard, resolution)
    }

    pub fn is_mutating(&self) -> bool {
        self.saved.is_some()
    }

    /// Restore now; returns how many layers were written back
    pub fn release(mut self) -> usize {
        self.restore()
    }

    fn restore(&mut self) -> usize {
        match self.saved.take() {
            Some(saved) => {
                let restored = saved.snapshot.restore(self.document.layers_mut(), &saved.flat);
                log::debug!("Restored visibility of {restored} layers");
                restored
            }
            None => 0,
        }
    }
}

impl<D: DocumentAdapter> Deref for VisibilityGuard<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.document
    }
}

impl<D: DocumentAdapter> DerefMut for VisibilityGuard<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.document
    }
}

impl<D: DocumentAdapter> Drop for VisibilityGuard<'_, D> {
    fn drop(&mut self) {
        self.restore();
    }
}
