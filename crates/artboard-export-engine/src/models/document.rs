use crate::adapter::{AdapterError, DocumentAdapter};
use crate::export::{ArtboardRange, ExportOptions};
use crate::geometry::Bounds;
use crate::io;
use crate::models::{Artboard, LayerId, LayerTree, PageItem};
use crate::render::pdf;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk description of a document.
///
/// Rectangles are `[left, top, right, bottom]` in document space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub name: String,
    #[serde(default)]
    pub artboards: Vec<ArtboardFile>,
    #[serde(default)]
    pub layers: Vec<LayerFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtboardFile {
    #[serde(default)]
    pub name: String,
    pub rect: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFile {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub items: Vec<PageItemFile>,
    #[serde(default)]
    pub layers: Vec<LayerFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageItemFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Missing bounds model geometry the host could not read
    #[serde(default)]
    pub bounds: Option<Bounds>,
}

fn default_visible() -> bool {
    true
}

/// In-memory vector document: artboards plus a layer arena
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    name: String,
    artboards: Vec<Artboard>,
    active_artboard: usize,
    layers: LayerTree,
}

impl VectorDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artboards: Vec::new(),
            active_artboard: 0,
            layers: LayerTree::new(),
        }
    }

    /// Append an artboard; returns its zero-based index
    pub fn add_artboard(&mut self, name: impl Into<String>, rect: Bounds) -> usize {
        let index = self.artboards.len();
        self.artboards.push(Artboard::new(index, name, rect));
        index
    }

    pub fn active_artboard(&self) -> usize {
        self.active_artboard
    }

    fn check_index(&self, index: usize) -> Result<(), AdapterError> {
        if index < self.artboards.len() {
            Ok(())
        } else {
            Err(AdapterError::ArtboardOutOfRange {
                index,
                count: self.artboards.len(),
            })
        }
    }

    /// Serializable form; inverse of `From<DocumentFile>`
    pub fn to_file(&self) -> DocumentFile {
        let mut built: Vec<Option<LayerFile>> = vec![None; self.layers.len()];

        // Children always follow their parent in pre-order, so walking it
        // backwards finishes every child before its parent needs it.
        for id in self.layers.flatten().into_iter().rev() {
            let layer = self.layers.layer(id);
            let layers = layer
                .children()
                .iter()
                .filter_map(|child| built[child.index()].take())
                .collect();
            built[id.index()] = Some(LayerFile {
                name: layer.name().to_string(),
                visible: layer.is_visible(),
                items: layer
                    .items()
                    .iter()
                    .map(|item| PageItemFile {
                        name: item.name.clone(),
                        visible: item.visible,
                        bounds: item.bounds,
                    })
                    .collect(),
                layers,
            });
        }

        DocumentFile {
            name: self.name.clone(),
            artboards: self
                .artboards
                .iter()
                .map(|a| ArtboardFile {
                    name: a.name().to_string(),
                    rect: a.bounds(),
                })
                .collect(),
            layers: self
                .layers
                .roots()
                .iter()
                .filter_map(|root| built[root.index()].take())
                .collect(),
        }
    }
}

impl From<DocumentFile> for VectorDocument {
    fn from(file: DocumentFile) -> Self {
        let mut document = VectorDocument::new(file.name);
        for artboard in file.artboards {
            document.add_artboard(artboard.name, artboard.rect);
        }

        let mut stack: Vec<(Option<LayerId>, LayerFile)> =
            file.layers.into_iter().rev().map(|l| (None, l)).collect();

        while let Some((parent, layer)) = stack.pop() {
            let id = match parent {
                Some(parent) => document.layers.add_child(parent, layer.name, layer.visible),
                None => document.layers.add_root(layer.name, layer.visible),
            };
            for item in layer.items {
                document.layers.push_item(
                    id,
                    PageItem {
                        name: item.name,
                        visible: item.visible,
                        bounds: item.bounds,
                    },
                );
            }
            stack.extend(layer.layers.into_iter().rev().map(|child| (Some(id), child)));
        }

        document
    }
}

impl DocumentAdapter for VectorDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn artboards(&self) -> &[Artboard] {
        &self.artboards
    }

    fn set_active_artboard(&mut self, index: usize) -> Result<(), AdapterError> {
        self.check_index(index)?;
        self.active_artboard = index;
        Ok(())
    }

    fn layers(&self) -> &LayerTree {
        &self.layers
    }

    fn layers_mut(&mut self) -> &mut LayerTree {
        &mut self.layers
    }

    fn export_artboard_range(
        &self,
        path: &Path,
        range: ArtboardRange,
        options: &ExportOptions,
    ) -> Result<(), AdapterError> {
        let count = self.artboards.len();
        let indices = range
            .indices(count)
            .ok_or(AdapterError::RangeOutOfBounds { range, count })?;

        let artboards: Vec<&Artboard> = indices.map(|i| &self.artboards[i]).collect();
        let bytes = pdf::render(&self.name, &artboards, &self.layers, options);
        io::write_output(path, &bytes)?;
        log::debug!(
            "Wrote artboard range {range} of '{}' to {}",
            self.name,
            path.display()
        );
        Ok(())
    }

    fn duplicate(&self) -> Result<Self, AdapterError> {
        Ok(self.clone())
    }

    fn remove_artboard(&mut self, index: usize) -> Result<(), AdapterError> {
        self.check_index(index)?;
        if self.artboards.len() == 1 {
            return Err(AdapterError::LastArtboard);
        }

        self.artboards.remove(index);
        for (i, artboard) in self.artboards.iter_mut().enumerate() {
            artboard.reindex(i);
        }
        if self.active_artboard > index || self.active_artboard == self.artboards.len() {
            self.active_artboard = self.active_artboard.saturating_sub(1);
        }
        Ok(())
    }

    fn close_without_saving(self) {
        log::debug!("Discarding document '{}' without saving", self.name);
    }
}
