//! # Layerpack Library
//!
//! This library resolves installable packages from a layered set of
//! repositories held in a key-value store and produces fully-merged
//! deployment descriptors. It is used by the `layerpack` command-line tool
//! and can be embedded by any application that brings its own store.
//!
//! ## Quick Example
//!
//! ```
//! use layerpack::catalog::Catalog;
//! use layerpack::layer::LayerSet;
//! use layerpack::store::MemoryStore;
//!
//! // A store with a single base layer and an empty package index.
//! let mut store = MemoryStore::new();
//! store.put_string("layerpack/repository/0/name", "base");
//! store.put_string(
//!     "layerpack/repository/0/repo/meta/index.json",
//!     r#"{"packages": []}"#,
//! );
//!
//! let layers = LayerSet::load(&store, "layerpack/repository").unwrap();
//! assert_eq!(layers.base().unwrap().name, "base");
//!
//! let catalog = Catalog::new(&store, &layers);
//! assert!(catalog.list().unwrap().is_empty());
//! ```
//!
//! ## Core Concepts
//!
//! - **Layers (`layer`)**: A repository is an ordered stack of indexed
//!   layers. Index 0 is the base and carries the package index; higher
//!   indexes override base-layer documents and mark versions as supported.
//! - **Store access (`store`)**: All repository data is read through the
//!   `KvStore` trait, so the engine runs unchanged against an in-memory
//!   fake, a directory tree, or a networked store.
//! - **Catalog (`catalog`)**: Builds `Package` values from the base index,
//!   probes override layers for per-version support, and applies the
//!   current-version policy.
//! - **Definitions (`definition`)**: Collects the five descriptor documents
//!   for one package version across all layers (last-writer-wins per
//!   document) and exposes the merged configuration and rendered
//!   descriptor.
//! - **Merging (`schema`, `merge`)**: Schema defaults are extracted
//!   recursively and overlaid with the explicit options document in a
//!   right-biased recursive merge.
//! - **Rendering (`render`)**: The deployment template is rendered with the
//!   merged configuration.
//!
//! ## Resolution Flow
//!
//! 1. **Load layers**: discover layer indexes and names under the store
//!    root.
//! 2. **Build the catalog**: parse the base package index, probe support,
//!    resolve current versions.
//! 3. **Resolve the version**: exact requested match, else the release
//!    with the greatest index.
//! 4. **Assemble the definition**: sweep all layers for the descriptor
//!    documents.
//! 5. **Merge and render**: overlay options on schema defaults and render
//!    the template.
//!
//! Every step owns its data for the duration of one resolution request;
//! nothing is cached across calls.

pub mod catalog;
pub mod definition;
pub mod error;
pub mod layer;
pub mod merge;
pub mod output;
pub mod render;
pub mod schema;
pub mod store;

#[cfg(test)]
mod merge_proptest;
