pub mod adapter;
pub mod export;
pub mod geometry;
pub mod io;
pub mod models;
pub mod render;
pub mod visibility;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use adapter::{AdapterError, DocumentAdapter};
pub use export::{ExportRequest, PreconditionError, RunReport, run_export};
pub use geometry::{Bounds, GeometryError};
pub use io::*;
pub use models::{Artboard, LayerId, LayerTree, PageItem, VectorDocument};
pub use visibility::{SnapshotKey, VisibilityGuard};
