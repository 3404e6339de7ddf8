use crate::geometry::{Bounds, GeometryError};
use kurbo::Rect;
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a layer inside a [`LayerTree`].
///
/// Handles are issued by the tree and stay valid for its lifetime; layers are
/// never removed individually.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u32);

impl LayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({})", self.0)
    }
}

/// A piece of content owned by a layer
#[derive(Debug, Clone, PartialEq)]
pub struct PageItem {
    pub name: Option<String>,
    pub visible: bool,
    pub bounds: Option<Bounds>,
}

impl PageItem {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            name: None,
            visible: true,
            bounds: Some(bounds),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Bounds as drawn, if they can be read
    pub fn visible_bounds(&self) -> Result<Rect, GeometryError> {
        self.bounds.ok_or(GeometryError::Missing)?.readable()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    name: String,
    visible: bool,
    items: Vec<PageItem>,
    parent: Option<LayerId>,
    children: Vec<LayerId>,
}

impl Layer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    pub fn parent(&self) -> Option<LayerId> {
        self.parent
    }

    pub fn children(&self) -> &[LayerId] {
        &self.children
    }
}

/// Arena holding a document's layer hierarchy.
///
/// Nodes are addressed by [`LayerId`]; each node keeps its parent and an
/// ordered list of child ids. All traversals use explicit work lists, so
/// nesting depth is bounded only by memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerTree {
    nodes: Vec<Layer>,
    roots: Vec<LayerId>,
}

impl LayerTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level layer
    pub fn add_root(&mut self, name: impl Into<String>, visible: bool) -> LayerId {
        let id = self.push_node(name.into(), visible, None);
        self.roots.push(id);
        id
    }

    /// Append a sublayer as the last child of `parent`
    pub fn add_child(&mut self, parent: LayerId, name: impl Into<String>, visible: bool) -> LayerId {
        let id = self.push_node(name.into(), visible, Some(parent));
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn push_node(&mut self, name: String, visible: bool, parent: Option<LayerId>) -> LayerId {
        let id = LayerId(self.nodes.len() as u32);
        self.nodes.push(Layer {
            name,
            visible,
            items: Vec::new(),
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn push_item(&mut self, layer: LayerId, item: PageItem) {
        self.nodes[layer.index()].items.push(item);
    }

    /// Layer for a handle issued by this tree
    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.nodes[id.index()]
    }

    pub fn roots(&self) -> &[LayerId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layer(id).visible
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        self.nodes[id.index()].visible = visible;
    }

    /// Per-layer flag, indexed by [`LayerId::index`]: visible itself and
    /// every ancestor visible. One pass over `order`, which must be pre-order.
    pub fn effective_visibility(&self, order: &[LayerId]) -> Vec<bool> {
        let mut shown = vec![false; self.nodes.len()];
        for &id in order {
            let layer = self.layer(id);
            shown[id.index()] =
                layer.visible && layer.parent.is_none_or(|parent| shown[parent.index()]);
        }
        shown
    }

    /// Every layer in depth-first pre-order: parent before children,
    /// siblings in their original order.
    pub fn flatten(&self) -> Vec<LayerId> {
        self.preorder(&self.roots)
    }

    /// `root` followed by all its descendants, in pre-order
    pub fn flatten_from(&self, root: LayerId) -> Vec<LayerId> {
        self.preorder(&[root])
    }

    fn preorder(&self, start: &[LayerId]) -> Vec<LayerId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<LayerId> = start.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.layer(id).children.iter().rev());
        }

        order
    }

    /// First layer with the given name in pre-order
    pub fn find_by_name(&self, name: &str) -> Option<LayerId> {
        self.flatten()
            .into_iter()
            .find(|id| self.layer(*id).name == name)
    }

    /// Current visibility keyed by layer name.
    ///
    /// Later layers win on duplicate names; meant for reporting and tests.
    pub fn visibility_by_name(&self) -> BTreeMap<String, bool> {
        self.flatten()
            .into_iter()
            .map(|id| {
                let layer = self.layer(id);
                (layer.name.clone(), layer.visible)
            })
            .collect()
    }
}
