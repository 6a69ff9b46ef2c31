//! # Repository Layers
//!
//! A repository is stored as an ordered stack of *layers*. The layer at
//! index 0 is the base: it carries the package index that defines which
//! packages and versions exist at all. Layers at index 1 and above are
//! overrides, applied in ascending index order; they exist specifically to
//! supersede base-layer descriptor documents and to mark versions as
//! supported.
//!
//! Layers are a flat ordered collection, not an inheritance chain. All
//! precedence decisions are made by a single pass over the sorted sequence,
//! last writer wins.
//!
//! ## Store layout
//!
//! Under a configurable root (default `layerpack/repository`):
//!
//! ```text
//! <root>/<index>/name                     layer name
//! <root>/<index>/repo/meta/index.json     package index (base layer only)
//! <root>/<index>/repo/packages/...        per-version descriptor documents
//! ```

use crate::error::{Error, Result};
use crate::store::KvStore;
use log::warn;

/// Default key prefix under which repository layers live.
pub const DEFAULT_STORE_ROOT: &str = "layerpack/repository";

/// A single named, indexed repository layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Human-readable layer name, stored at `<root>/<index>/name`.
    pub name: String,
    /// Position in the stack; 0 is the base layer.
    pub index: u32,
}

impl Layer {
    /// Whether this is the base layer.
    pub fn is_base(&self) -> bool {
        self.index == 0
    }

    /// Key of this layer's package index document.
    pub fn package_index_key(&self, root: &str) -> String {
        format!("{}/{}/repo/meta/index.json", root, self.index)
    }

    /// Key prefix of this layer's per-version package documents.
    pub fn packages_key(&self, root: &str) -> String {
        format!("{}/{}/repo/packages", root, self.index)
    }
}

/// An ordered collection of repository layers, sorted ascending by index.
#[derive(Debug, Clone)]
pub struct LayerSet {
    root: String,
    layers: Vec<Layer>,
}

impl LayerSet {
    /// Discover and load the layer stack from the store.
    ///
    /// Child keys under `root` that are not numeric indexes are skipped
    /// with a warning, as is any layer whose name cannot be read. Neither
    /// aborts loading; a stack missing its base layer only fails later,
    /// when [`LayerSet::base`] is called.
    pub fn load(store: &dyn KvStore, root: &str) -> Result<LayerSet> {
        let root = root.trim_end_matches('/').to_string();
        let mut layers = Vec::new();

        for child in store.list_child_keys(&root)? {
            let index: u32 = match child.parse() {
                Ok(index) => index,
                Err(_) => {
                    warn!("Unexpected repository index at {}/{}", root, child);
                    continue;
                }
            };

            let name_key = format!("{}/{}/name", root, index);
            match store.get(&name_key) {
                Ok(Some(bytes)) => {
                    let name = String::from_utf8_lossy(&bytes).trim().to_string();
                    layers.push(Layer { name, index });
                }
                Ok(None) => {
                    warn!("Could not find name for repository layer {}", index);
                }
                Err(err) => {
                    warn!("Could not read {}: {}", name_key, err);
                }
            }
        }

        layers.sort_by_key(|layer| layer.index);
        Ok(LayerSet { root, layers })
    }

    /// Build a layer set directly from known layers (tests, embedding).
    pub fn from_layers<R: Into<String>>(root: R, mut layers: Vec<Layer>) -> LayerSet {
        layers.sort_by_key(|layer| layer.index);
        LayerSet {
            root: root.into(),
            layers,
        }
    }

    /// The key prefix this set was loaded from.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The unique base layer (index 0).
    pub fn base(&self) -> Result<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.is_base())
            .ok_or_else(|| Error::BaseLayerNotFound {
                root: self.root.clone(),
            })
    }

    /// The override layers, ascending by index.
    ///
    /// This ordering is the authoritative precedence order: a document
    /// found in a higher-index layer always wins.
    pub fn overrides(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| !layer.is_base())
    }

    /// All layers, base first, then overrides ascending by index.
    pub fn all(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers in the set.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the set contains no layers at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
