// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
use artboard_export_engine::geometry::Bounds;
use artboard_export_engine::models::{LayerId, LayerTree, PageItem};

/// A chain of `depth` nested layers with one item at the bottom
#[allow(dead_code)]
pub fn deep_tree(depth: usize, item: Bounds) -> LayerTree {
    let mut tree = LayerTree::new();
    let mut parent = tree.add_root("Layer 0", true);
    for level in 1..depth {
        parent = tree.add_child(parent, format!("Layer {level}"), true);
    }
    tree.push_item(parent, PageItem::new(item));
    tree
}

/// `roots` top-level layers, each with `children` sublayers spread along x
#[allow(dead_code)]
pub fn wide_tree(roots: usize, children: usize) -> LayerTree {
    let mut tree = LayerTree::new();
    for r in 0..roots {
        let root = tree.add_root(format!("Group {r}"), true);
        for c in 0..children {
            let child: LayerId = tree.add_child(root, format!("Group {r}/{c}"), c % 4 != 0);
            let x = (r * children + c) as f64 * 10.0;
            for i in 0..4 {
                let y = i as f64 * 10.0;
                tree.push_item(child, PageItem::new(Bounds::new(x, y + 5.0, x + 5.0, y)));
            }
        }
    }
    tree
}
