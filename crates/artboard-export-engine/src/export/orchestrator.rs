use crate::adapter::{AdapterError, DocumentAdapter};
use crate::export::{
    ArtboardFailure, ExportFailure, ExportMethod, ExportOptions, ExportedArtboard, PdfCompatibility,
    RunReport, TwoPhaseExport, artboard_file_name,
};
use crate::io::{self, IoError};
use crate::models::Artboard;
use crate::visibility::{SnapshotKey, VisibilityGuard};
use log::Level;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything the caller chooses for a run
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub output_dir: PathBuf,
    pub hide_unrelated_layers: bool,
    pub optimize: bool,
    pub thumbnails: bool,
    /// Log per-artboard progress at info level instead of debug
    pub debug: bool,
    pub snapshot_key: SnapshotKey,
    pub compatibility: PdfCompatibility,
}

impl ExportRequest {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            hide_unrelated_layers: true,
            optimize: true,
            thumbnails: false,
            debug: false,
            snapshot_key: SnapshotKey::default(),
            compatibility: PdfCompatibility::default(),
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            optimize: self.optimize,
            thumbnails: self.thumbnails,
            compatibility: self.compatibility,
            ..ExportOptions::default()
        }
    }

    fn progress_level(&self) -> Level {
        if self.debug { Level::Info } else { Level::Debug }
    }
}

/// Problems that stop a run before anything is touched
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("No document is open")]
    NoDocument,
    #[error("Document '{0}' has no artboards")]
    NoArtboards(String),
    #[error(transparent)]
    OutputDir(#[from] IoError),
}

/// Why a single artboard was not exported
#[derive(Debug, Error)]
pub enum ArtboardError {
    #[error("could not make artboard active: {0}")]
    Activation(#[source] AdapterError),
    #[error(transparent)]
    Export(#[from] ExportFailure),
}

/// Export every artboard of `document` to its own file in the output directory.
///
/// Preconditions are checked before any mutation. After that, a failing
/// artboard is recorded in the report and the run moves on; layer visibility
/// is restored at the end of every artboard, whatever happened.
pub fn run_export<D: DocumentAdapter>(
    document: Option<&mut D>,
    request: &ExportRequest,
) -> Result<RunReport, PreconditionError> {
    let document = document.ok_or(PreconditionError::NoDocument)?;
    if document.artboards().is_empty() {
        return Err(PreconditionError::NoArtboards(document.name().to_string()));
    }
    io::validate_output_dir(&request.output_dir)?;

    let artboards = document.artboards().to_vec();
    log::info!(
        "Exporting {} artboards of '{}' to {}",
        artboards.len(),
        document.name(),
        request.output_dir.display()
    );

    let options = request.export_options();
    let strategy = TwoPhaseExport::new(&options);
    let mut report = RunReport::new(request.output_dir.clone());

    for artboard in &artboards {
        let path = request.output_dir.join(artboard_file_name(artboard));
        let outcome = match export_artboard(document, artboard, &path, request, &strategy) {
            Ok(method) => {
                log::info!(
                    "Exported artboard {} to {} ({method:?})",
                    artboard.index() + 1,
                    path.display()
                );
                Ok(ExportedArtboard {
                    artboard_index: artboard.index(),
                    artboard_name: artboard.display_name(),
                    path,
                    method,
                })
            }
            Err(e) => {
                log::error!("Error exporting artboard {}: {e}", artboard.index() + 1);
                Err(ArtboardFailure {
                    artboard_index: artboard.index(),
                    artboard_name: artboard.display_name(),
                    message: e.to_string(),
                })
            }
        };
        report.record(outcome);
    }

    log::info!(
        "Export finished: {} exported, {} failed",
        report.exported_count(),
        report.failed_count()
    );
    Ok(report)
}

fn export_artboard<D: DocumentAdapter>(
    document: &mut D,
    artboard: &Artboard,
    path: &Path,
    request: &ExportRequest,
    strategy: &TwoPhaseExport<'_>,
) -> Result<ExportMethod, ArtboardError> {
    let level = request.progress_level();
    log::log!(
        level,
        "Exporting artboard {}: {}",
        artboard.index() + 1,
        artboard.display_name()
    );

    document
        .set_active_artboard(artboard.index())
        .map_err(ArtboardError::Activation)?;

    let guard = if request.hide_unrelated_layers {
        let (guard, resolution) =
            VisibilityGuard::isolate(document, artboard.rect(), request.snapshot_key);
        log::log!(
            level,
            "Artboard {}: showing {} layers, hiding {}",
            artboard.index() + 1,
            resolution.shown.len(),
            resolution.hidden.len()
        );
        guard
    } else {
        VisibilityGuard::passthrough(document)
    };

    let result = strategy.export(&*guard, artboard.index(), path);
    guard.release();
    Ok(result?)
}
