//! The contract between the export core and a host document.
//!
//! The core never touches a concrete document type. It drives anything that
//! can list artboards, expose its layer tree, export an artboard range and
//! produce a disposable copy of itself. [`crate::VectorDocument`] is the
//! in-memory implementation used by the command-line tool.

use crate::export::{ArtboardRange, ExportOptions};
use crate::io::IoError;
use crate::models::{Artboard, LayerTree};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("artboard index {index} is out of range (document has {count} artboards)")]
    ArtboardOutOfRange { index: usize, count: usize },
    #[error("artboard range {range} is out of bounds (document has {count} artboards)")]
    RangeOutOfBounds { range: ArtboardRange, count: usize },
    #[error("cannot remove the last artboard of a document")]
    LastArtboard,
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Operations the export core needs from a host document
pub trait DocumentAdapter: Sized {
    fn name(&self) -> &str;

    /// Artboards in document order, each carrying its own index
    fn artboards(&self) -> &[Artboard];

    fn set_active_artboard(&mut self, index: usize) -> Result<(), AdapterError>;

    fn layers(&self) -> &LayerTree;

    fn layers_mut(&mut self) -> &mut LayerTree;

    /// Write the artboards in `range` to a single output file at `path`
    fn export_artboard_range(
        &self,
        path: &Path,
        range: ArtboardRange,
        options: &ExportOptions,
    ) -> Result<(), AdapterError>;

    /// Independent copy of the document, including current layer visibility
    fn duplicate(&self) -> Result<Self, AdapterError>;

    fn remove_artboard(&mut self, index: usize) -> Result<(), AdapterError>;

    /// Discard the document; nothing is written back
    fn close_without_saving(self);
}
