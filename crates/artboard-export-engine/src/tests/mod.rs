use crate::adapter::{AdapterError, DocumentAdapter};
use crate::export::{ArtboardRange, ExportOptions};
use crate::geometry::Bounds;
use crate::models::{Artboard, LayerTree, PageItem, VectorDocument};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;

/// Create a temporary directory for test output
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file with content inside a test directory
pub fn create_test_file(dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// A1 covers x 0..100 and A2 x 100..200 (both y 0..100). L1 holds one item
/// inside A1 only, L2 one item inside A2 only.
pub fn two_artboard_document() -> VectorDocument {
    let mut document = VectorDocument::new("scenario.ai");
    document.add_artboard("A1", Bounds::new(0.0, 100.0, 100.0, 0.0));
    document.add_artboard("A2", Bounds::new(100.0, 100.0, 200.0, 0.0));

    let layers = document.layers_mut();
    let l1 = layers.add_root("L1", true);
    layers.push_item(l1, PageItem::new(Bounds::new(10.0, 20.0, 20.0, 10.0)));
    let l2 = layers.add_root("L2", true);
    layers.push_item(l2, PageItem::new(Bounds::new(150.0, 20.0, 160.0, 10.0)));

    document
}

/// Adapter calls observed by a [`ScriptedDocument`] and its copies
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Activate { scratch: bool, index: usize },
    Export { scratch: bool, range: String, path: PathBuf },
    Duplicate,
    Remove { index: usize },
    Close,
}

#[derive(Debug, Default)]
struct Journal {
    calls: Vec<Call>,
    exported_visibility: Vec<(PathBuf, BTreeMap<String, bool>)>,
}

#[derive(Debug, Clone, Default)]
struct Script {
    primary: BTreeSet<usize>,
    fallback: BTreeSet<usize>,
    activation: BTreeSet<usize>,
    removal: bool,
}

/// Wraps a [`VectorDocument`], journals every adapter call and fails on
/// request. Failures are keyed by the artboard's index in the original
/// document, also inside scratch copies.
#[derive(Debug)]
pub struct ScriptedDocument {
    inner: VectorDocument,
    scratch: bool,
    origin: Vec<usize>,
    script: Script,
    journal: Rc<RefCell<Journal>>,
}

impl ScriptedDocument {
    pub fn new(inner: VectorDocument) -> Self {
        Self {
            origin: (0..inner.artboards().len()).collect(),
            inner,
            scratch: false,
            script: Script::default(),
            journal: Rc::default(),
        }
    }

    pub fn fail_primary(mut self, index: usize) -> Self {
        self.script.primary.insert(index);
        self
    }

    pub fn fail_fallback(mut self, index: usize) -> Self {
        self.script.fallback.insert(index);
        self
    }

    pub fn fail_activation(mut self, index: usize) -> Self {
        self.script.activation.insert(index);
        self
    }

    pub fn fail_removal(mut self) -> Self {
        self.script.removal = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.borrow().calls.clone()
    }

    /// Layer visibility by name at each successful export, in order
    pub fn exported_visibility(&self) -> Vec<(PathBuf, BTreeMap<String, bool>)> {
        self.journal.borrow().exported_visibility.clone()
    }

    pub fn inner(&self) -> &VectorDocument {
        &self.inner
    }

    fn record(&self, call: Call) {
        self.journal.borrow_mut().calls.push(call);
    }

    fn scripted_failure(phase: &str, index: usize) -> AdapterError {
        AdapterError::Other(anyhow::anyhow!(
            "scripted {phase} failure for artboard {}",
            index + 1
        ))
    }
}

impl DocumentAdapter for ScriptedDocument {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn artboards(&self) -> &[Artboard] {
        self.inner.artboards()
    }

    fn set_active_artboard(&mut self, index: usize) -> Result<(), AdapterError> {
        self.record(Call::Activate {
            scratch: self.scratch,
            index,
        });
        if !self.scratch && self.script.activation.contains(&index) {
            return Err(Self::scripted_failure("activation", index));
        }
        self.inner.set_active_artboard(index)
    }

    fn layers(&self) -> &LayerTree {
        self.inner.layers()
    }

    fn layers_mut(&mut self) -> &mut LayerTree {
        self.inner.layers_mut()
    }

    fn export_artboard_range(
        &self,
        path: &Path,
        range: ArtboardRange,
        options: &ExportOptions,
    ) -> Result<(), AdapterError> {
        self.record(Call::Export {
            scratch: self.scratch,
            range: range.to_string(),
            path: path.to_path_buf(),
        });

        let original = range
            .indices(self.origin.len())
            .map(|indices| self.origin[*indices.start()]);
        let (phase, failing) = if self.scratch {
            ("fallback", &self.script.fallback)
        } else {
            ("primary", &self.script.primary)
        };
        if let Some(index) = original
            && failing.contains(&index)
        {
            return Err(Self::scripted_failure(phase, index));
        }

        self.inner.export_artboard_range(path, range, options)?;
        self.journal
            .borrow_mut()
            .exported_visibility
            .push((path.to_path_buf(), self.inner.layers().visibility_by_name()));
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, AdapterError> {
        self.record(Call::Duplicate);
        Ok(Self {
            inner: self.inner.duplicate()?,
            scratch: true,
            origin: self.origin.clone(),
            script: self.script.clone(),
            journal: Rc::clone(&self.journal),
        })
    }

    fn remove_artboard(&mut self, index: usize) -> Result<(), AdapterError> {
        self.record(Call::Remove { index });
        if self.script.removal {
            return Err(AdapterError::Other(anyhow::anyhow!(
                "scripted removal failure"
            )));
        }
        self.inner.remove_artboard(index)?;
        self.origin.remove(index);
        Ok(())
    }

    fn close_without_saving(self) {
        self.record(Call::Close);
    }
}
