//! Per-artboard PDF export.
//!
//! - **`options`**: export settings and 1-based artboard ranges
//! - **`filename`**: output file names derived from artboard names
//! - **`strategy`**: direct export with an isolated-copy fallback
//! - **`orchestrator`**: the run over every artboard of a document
//! - **`report`**: what was exported and what failed

pub mod filename;
pub mod options;
pub mod orchestrator;
pub mod report;
pub mod strategy;

pub use filename::{OUTPUT_EXTENSION, artboard_file_name, sanitize};
pub use options::{ArtboardRange, ExportOptions, PdfCompatibility};
pub use orchestrator::{ArtboardError, ExportRequest, PreconditionError, run_export};
pub use report::{ArtboardFailure, ExportOutcome, ExportedArtboard, RunReport};
pub use strategy::{ExportFailure, ExportMethod, TwoPhaseExport};
