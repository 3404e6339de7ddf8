use crate::export::ExportMethod;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// An artboard written to disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedArtboard {
    pub artboard_index: usize,
    pub artboard_name: String,
    pub path: PathBuf,
    pub method: ExportMethod,
}

/// An artboard that could not be exported
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtboardFailure {
    pub artboard_index: usize,
    pub artboard_name: String,
    pub message: String,
}

/// Result of one artboard's iteration
pub type ExportOutcome = Result<ExportedArtboard, ArtboardFailure>;

/// Everything a caller needs to tell the user how a run went
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub exported: Vec<ExportedArtboard>,
    pub failures: Vec<ArtboardFailure>,
}

impl RunReport {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            exported: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ExportOutcome) {
        match outcome {
            Ok(exported) => self.exported.push(exported),
            Err(failure) => self.failures.push(failure),
        }
    }

    pub fn exported_count(&self) -> usize {
        self.exported.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// True when every artboard was exported
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Export completed! {} artboards exported to: {}",
            self.exported_count(),
            self.output_dir.display()
        )?;
        if !self.failures.is_empty() {
            write!(f, "\n{} artboards failed:", self.failed_count())?;
            for failure in &self.failures {
                write!(
                    f,
                    "\n  artboard {} ({}): {}",
                    failure.artboard_index + 1,
                    failure.artboard_name,
                    failure.message
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exported(index: usize, name: &str) -> ExportOutcome {
        Ok(ExportedArtboard {
            artboard_index: index,
            artboard_name: name.to_string(),
            path: PathBuf::from(format!("/out/{name}.pdf")),
            method: ExportMethod::Primary,
        })
    }

    #[test]
    fn test_display_all_exported() {
        let mut report = RunReport::new(PathBuf::from("/out"));
        report.record(exported(0, "Front"));
        report.record(exported(1, "Back"));

        assert!(report.is_complete());
        assert_eq!(
            report.to_string(),
            "Export completed! 2 artboards exported to: /out"
        );
    }

    #[test]
    fn test_display_itemizes_failures() {
        let mut report = RunReport::new(PathBuf::from("/out"));
        report.record(exported(0, "Front"));
        report.record(Err(ArtboardFailure {
            artboard_index: 1,
            artboard_name: "Back".to_string(),
            message: "disk full".to_string(),
        }));

        assert!(!report.is_complete());
        assert_eq!(report.exported_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            report.to_string(),
            "Export completed! 1 artboards exported to: /out\n1 artboards failed:\n  artboard 2 (Back): disk full"
        );
    }
}
