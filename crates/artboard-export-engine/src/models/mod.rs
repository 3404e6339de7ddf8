pub mod artboard;
pub mod document;
pub mod layer_tree;

pub use artboard::Artboard;
pub use document::{ArtboardFile, DocumentFile, LayerFile, PageItemFile, VectorDocument};
pub use layer_tree::{Layer, LayerId, LayerTree, PageItem};
