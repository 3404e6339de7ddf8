use crate::models::{LayerId, LayerTree};
use std::collections::BTreeMap;

/// How layers are identified inside a [`VisibilitySnapshot`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapshotKey {
    /// Stable arena id; every layer gets its own entry
    #[default]
    Identity,
    /// Layer name. Layers sharing a name share one entry, and the layer
    /// captured last decides the value restored to all of them.
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Key {
    Id(LayerId),
    Name(String),
}

/// Layer visibility recorded before an artboard-specific mutation
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilitySnapshot {
    key: SnapshotKey,
    entries: BTreeMap<Key, bool>,
}

impl VisibilitySnapshot {
    /// Record `key -> visible` for every layer in `flat`, in order
    pub fn capture(tree: &LayerTree, flat: &[LayerId], key: SnapshotKey) -> Self {
        let mut entries = BTreeMap::new();
        for &id in flat {
            entries.insert(Self::key_for(tree, id, key), tree.is_visible(id));
        }
        Self { key, entries }
    }

    /// Put recorded visibility back on every layer in `flat` that has an entry.
    ///
    /// Layers without an entry are left untouched. Returns how many layers
    /// were written.
    pub fn restore(&self, tree: &mut LayerTree, flat: &[LayerId]) -> usize {
        let mut restored = 0;
        for &id in flat {
            if let Some(&visible) = self.entries.get(&Self::key_for(tree, id, self.key)) {
                tree.set_visible(id, visible);
                restored += 1;
            }
        }
        restored
    }

    /// Recorded visibility for a layer, if captured
    pub fn recorded(&self, tree: &LayerTree, id: LayerId) -> Option<bool> {
        self.entries.get(&Self::key_for(tree, id, self.key)).copied()
    }

    pub fn key(&self) -> SnapshotKey {
        self.key
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key_for(tree: &LayerTree, id: LayerId, key: SnapshotKey) -> Key {
        match key {
            SnapshotKey::Identity => Key::Id(id),
            SnapshotKey::Name => Key::Name(tree.layer(id).name().to_string()),
        }
    }
}
