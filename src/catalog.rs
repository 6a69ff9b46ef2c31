//! # Package Catalog
//!
//! Builds the set of installable packages from the base layer's package
//! index and enriches each entry by consulting the override layers.
//!
//! A version is *supported* when at least one override layer supplies an
//! options document for it; a package is supported when any of its versions
//! is. Support is derived state, recomputed on every catalog build by
//! probing the store, never trusted from the index itself.
//!
//! Probing is deliberately forgiving: a store-level failure on a single
//! probe is logged and treated as "not found at this layer" so that one
//! flaky read cannot take down the whole listing. Packages are enriched
//! independently of each other, so the sweep runs in parallel across
//! packages with results kept in index order.

use crate::definition::OPTIONS_DOCUMENT;
use crate::error::{Error, Result};
use crate::layer::{Layer, LayerSet};
use crate::store::KvStore;
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One concrete version of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVersion {
    /// Version string as declared in the package index.
    pub version: String,
    /// Opaque, lexicographically comparable token ordering builds by
    /// recency. Not assumed numeric.
    pub release_index: String,
    /// Whether any override layer supplies an options document for this
    /// version. Derived, recomputed per catalog build.
    pub supported: bool,
}

/// An installable package with its known versions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    pub description: String,
    pub framework: bool,
    pub current_version: String,
    pub supported: bool,
    pub tags: BTreeSet<String>,
    pub versions: BTreeMap<String, PackageVersion>,
}

impl Package {
    /// Container letter grouping packages in the store: the uppercased
    /// first character of the name.
    pub fn container_id(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }

    /// Store key fragment for this package: `<C>/<name>`.
    pub fn package_key(&self) -> String {
        format!("{}/{}", self.container_id(), self.name)
    }

    /// Store key fragment for one release of this package: `<C>/<name>/<R>`.
    pub fn package_version_key(&self, release_index: &str) -> String {
        format!("{}/{}", self.package_key(), release_index)
    }

    /// Versions supplied with an options document by some override layer.
    pub fn supported_versions(&self) -> Vec<&PackageVersion> {
        self.versions.values().filter(|v| v.supported).collect()
    }

    /// Whether any version of this package is supported.
    pub fn has_supported_version(&self) -> bool {
        self.versions.values().any(|v| v.supported)
    }

    /// Exact match on the version string, case-insensitive and trimmed.
    ///
    /// Matches unsupported versions too; requesting a specific version is
    /// always honored when it exists.
    pub fn find_version(&self, version: &str) -> Option<&PackageVersion> {
        let requested = version.trim();
        self.versions
            .values()
            .find(|v| v.version.eq_ignore_ascii_case(requested))
    }

    /// The version with the greatest release index across *all* versions,
    /// supported or not.
    pub fn latest_version(&self) -> Option<&PackageVersion> {
        self.versions.values().max_by(|a, b| {
            a.release_index
                .cmp(&b.release_index)
                .then_with(|| a.version.cmp(&b.version))
        })
    }

    /// Apply the current-version policy after support probing.
    ///
    /// An unsupported package defers entirely to the base-declared value.
    /// A supported package keeps its declared current version when that
    /// version is itself supported; otherwise the supported version with
    /// the greatest release index takes over.
    fn resolve_current_version(&mut self) {
        if !self.has_supported_version() {
            return;
        }

        if let Some(current) = self.versions.get(&self.current_version) {
            if current.supported {
                return;
            }
        }

        let best = self
            .versions
            .values()
            .filter(|v| v.supported)
            .max_by(|a, b| {
                a.release_index
                    .cmp(&b.release_index)
                    .then_with(|| a.version.cmp(&b.version))
            })
            .map(|v| v.version.clone());

        if let Some(version) = best {
            self.current_version = version;
        }
    }
}

/// Package index document stored at the base layer.
#[derive(Debug, Deserialize)]
struct PackageIndex {
    #[serde(default)]
    packages: Vec<PackageIndexEntry>,
}

/// One entry of the package index.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PackageIndexEntry {
    name: String,
    description: String,
    framework: bool,
    current_version: String,
    tags: BTreeSet<String>,
    /// version string -> release index
    versions: BTreeMap<String, String>,
}

impl PackageIndexEntry {
    /// Convert an index entry into a catalog package with every version
    /// initially unsupported.
    fn into_package(self) -> Package {
        let versions = self
            .versions
            .into_iter()
            .map(|(version, release_index)| {
                (
                    version.clone(),
                    PackageVersion {
                        version,
                        release_index,
                        supported: false,
                    },
                )
            })
            .collect();

        Package {
            name: self.name,
            description: self.description,
            framework: self.framework,
            current_version: self.current_version,
            supported: false,
            tags: self.tags,
            versions,
        }
    }
}

/// Catalog of packages resolvable against one layer set.
///
/// Owns nothing: a catalog borrows its store handle and layer set, and
/// every call builds fresh `Package` values. Nothing is cached between
/// calls.
pub struct Catalog<'a> {
    store: &'a dyn KvStore,
    layers: &'a LayerSet,
}

impl<'a> Catalog<'a> {
    pub fn new(store: &'a dyn KvStore, layers: &'a LayerSet) -> Self {
        Self { store, layers }
    }

    /// List all packages from the base index, enriched with per-version
    /// support and the resolved current version.
    pub fn list(&self) -> Result<Vec<Package>> {
        let entries = self.index_entries()?;
        let overrides: Vec<&Layer> = self.layers.overrides().collect();

        let mut packages: Vec<Package> = entries
            .into_iter()
            .map(PackageIndexEntry::into_package)
            .collect();

        // Per-package enrichment is independent work; the collection keeps
        // index order, so parallelism cannot change any outcome.
        packages.par_iter_mut().for_each(|package| {
            self.probe_supported(package, &overrides);
            package.resolve_current_version();
        });

        Ok(packages)
    }

    /// Find a package by name: case-insensitive, whitespace-trimmed exact
    /// match. `Ok(None)` means the package does not exist, as opposed to a
    /// store failure.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Package>> {
        let requested = name.trim();
        Ok(self
            .list()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(requested)))
    }

    /// Probe every override layer for each version's options document.
    ///
    /// Presence in any layer marks the version supported. A failed probe is
    /// explicitly downgraded to "not found at this layer": it is logged and
    /// the sweep continues, so a single flaky read never aborts the build.
    fn probe_supported(&self, package: &mut Package, overrides: &[&Layer]) {
        let root = self.layers.root();
        let package_key = package.package_key();

        for version in package.versions.values_mut() {
            for layer in overrides {
                let key = format!(
                    "{}/{}/{}/{}",
                    layer.packages_key(root),
                    package_key,
                    version.release_index,
                    OPTIONS_DOCUMENT
                );

                match self.store.get(&key) {
                    Ok(Some(_)) => version.supported = true,
                    Ok(None) => {}
                    Err(err) => {
                        warn!("Could not probe {}: {}", key, err);
                    }
                }
            }
        }

        package.supported = package.has_supported_version();
    }

    fn index_entries(&self) -> Result<Vec<PackageIndexEntry>> {
        let base = self.layers.base()?;
        let key = base.package_index_key(self.layers.root());

        let bytes = self.store.get(&key)?.ok_or_else(|| Error::IndexParse {
            key: key.clone(),
            message: "package index not found".to_string(),
        })?;

        let index: PackageIndex =
            serde_json::from_slice(&bytes).map_err(|err| Error::IndexParse {
                key: key.clone(),
                message: err.to_string(),
            })?;

        Ok(index.packages)
    }
}
