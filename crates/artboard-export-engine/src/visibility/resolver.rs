use crate::geometry::intersects_artboard;
use crate::models::{Layer, LayerId, LayerTree};
use kurbo::Rect;

/// Outcome of resolving a tree against one artboard, in pre-order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub shown: Vec<LayerId>,
    pub hidden: Vec<LayerId>,
}

/// Whether any visible item of `layer` intersects the artboard
pub fn has_visible_items(layer: &Layer, artboard: Rect) -> bool {
    layer
        .items()
        .iter()
        .any(|item| item.visible && intersects_artboard(item.visible_bounds(), artboard))
}

/// Content-present flag for every layer in `order`, indexed by layer id.
///
/// `order` is pre-order, so walking it backwards decides each child before
/// its parent. A child's current visibility flag plays no part.
fn content_flags(tree: &LayerTree, order: &[LayerId], artboard: Rect) -> Vec<bool> {
    let mut content = vec![false; tree.len()];
    for &id in order.iter().rev() {
        let layer = tree.layer(id);
        content[id.index()] = has_visible_items(layer, artboard)
            || layer.children().iter().any(|child| content[child.index()]);
    }
    content
}

/// Show `root` and its sublayers iff they hold visible content on the
/// artboard, hiding everything else in that subtree.
///
/// Returns whether `root` has content.
pub fn resolve_layer(tree: &mut LayerTree, root: LayerId, artboard: Rect) -> bool {
    let order = tree.flatten_from(root);
    let content = content_flags(tree, &order, artboard);
    for &id in &order {
        tree.set_visible(id, content[id.index()]);
    }
    content[root.index()]
}

/// Resolve every layer of the tree against the artboard.
///
/// Each layer's visibility is overwritten with its content-present flag,
/// regardless of its previous value.
pub fn resolve_visibility(tree: &mut LayerTree, artboard: Rect) -> Resolution {
    let order = tree.flatten();
    let content = content_flags(tree, &order, artboard);
    let mut resolution = Resolution::default();

    for id in order {
        let visible = content[id.index()];
        tree.set_visible(id, visible);
        if visible {
            resolution.shown.push(id);
        } else {
            resolution.hidden.push(id);
        }
    }

    resolution
}
