use crate::adapter::{AdapterError, DocumentAdapter};
use crate::export::{ArtboardRange, ExportOptions};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Which phase produced an output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMethod {
    /// Range export straight from the document
    Primary,
    /// Export of a scratch copy holding only the artboard
    Fallback,
}

#[derive(Debug, Error)]
#[error("{fallback} (direct export failed first: {primary})")]
pub struct ExportFailure {
    pub primary: AdapterError,
    pub fallback: AdapterError,
}

/// Export one artboard: direct range export first, then an isolated scratch
/// copy if that fails.
///
/// The scratch copy is always closed without saving once it exists, whether
/// or not its export succeeded.
#[derive(Debug, Clone, Copy)]
pub struct TwoPhaseExport<'a> {
    options: &'a ExportOptions,
}

impl<'a> TwoPhaseExport<'a> {
    pub fn new(options: &'a ExportOptions) -> Self {
        Self { options }
    }

    pub fn export<D: DocumentAdapter>(
        &self,
        document: &D,
        index: usize,
        path: &Path,
    ) -> Result<ExportMethod, ExportFailure> {
        let primary = match self.primary(document, index, path) {
            Ok(()) => return Ok(ExportMethod::Primary),
            Err(e) => e,
        };
        log::warn!(
            "Direct export of artboard {} failed, retrying with an isolated copy: {primary}",
            index + 1
        );

        match self.fallback(document, index, path) {
            Ok(()) => Ok(ExportMethod::Fallback),
            Err(fallback) => Err(ExportFailure { primary, fallback }),
        }
    }

    /// Export range `"{index+1}-{index+1}"` of the document itself
    pub fn primary<D: DocumentAdapter>(
        &self,
        document: &D,
        index: usize,
        path: &Path,
    ) -> Result<(), AdapterError> {
        document.export_artboard_range(path, ArtboardRange::single(index), self.options)
    }

    /// Duplicate the document, drop every other artboard, export the copy
    pub fn fallback<D: DocumentAdapter>(
        &self,
        document: &D,
        index: usize,
        path: &Path,
    ) -> Result<(), AdapterError> {
        let mut scratch = document.duplicate()?;
        let result = isolate_artboard(&mut scratch, index).and_then(|()| {
            // Only the kept artboard remains, now at position 1
            scratch.export_artboard_range(path, ArtboardRange::single(0), self.options)
        });
        scratch.close_without_saving();
        result
    }
}

/// Make `keep` active, then remove every other artboard, last first
fn isolate_artboard<D: DocumentAdapter>(document: &mut D, keep: usize) -> Result<(), AdapterError> {
    document.set_active_artboard(keep)?;
    for index in (0..document.artboards().len()).rev() {
        if index != keep {
            document.remove_artboard(index)?;
        }
    }
    Ok(())
}
