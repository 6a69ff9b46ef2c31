//! # Package Definitions
//!
//! A *definition* is everything needed to deploy one concrete package
//! version: the five descriptor documents collected across the layer
//! stack, the merged configuration derived from them, and the rendered
//! deployment descriptor.
//!
//! ## Assembly
//!
//! For a resolved `(package, version)` pair every layer is visited in
//! precedence order (base first, then overrides ascending). Each of the
//! five documents is read from the layer's location for that version; a
//! present, non-empty document replaces whatever an earlier layer
//! supplied. This is last-writer-wins per document; document *contents*
//! are never merged across layers. A document absent from every layer
//! stays absent; only the options document is optional for a definition to
//! be deployable.
//!
//! ## Merging
//!
//! The merged configuration overlays the explicit options document onto
//! the defaults extracted from the configuration schema. An absent options
//! document means "schema defaults only".

use crate::catalog::{Catalog, Package, PackageVersion};
use crate::error::{Error, Result};
use crate::layer::LayerSet;
use crate::merge::merge_values;
use crate::render::render_descriptor;
use crate::schema::ConfigSchemaNode;
use crate::store::KvStore;
use log::{debug, warn};
use serde_json::{Map, Value as JsonValue};

/// Launch command document.
pub const COMMAND_DOCUMENT: &str = "command.json";
/// Configuration schema document.
pub const SCHEMA_DOCUMENT: &str = "config.json";
/// Deployment template document.
pub const TEMPLATE_DOCUMENT: &str = "marathon.json";
/// Package metadata document.
pub const METADATA_DOCUMENT: &str = "package.json";
/// Options (override) document; its presence in an override layer marks a
/// version supported.
pub const OPTIONS_DOCUMENT: &str = "mantl.json";

/// All descriptor documents, in the order they are collected.
pub const DESCRIPTOR_DOCUMENTS: [&str; 5] = [
    COMMAND_DOCUMENT,
    SCHEMA_DOCUMENT,
    TEMPLATE_DOCUMENT,
    METADATA_DOCUMENT,
    OPTIONS_DOCUMENT,
];

/// Reserved top-level configuration key naming the orchestration framework
/// a package runs under.
pub const FRAMEWORK_NAME_KEY: &str = "framework-name";

/// A descriptor document together with the store key it was read from.
///
/// The key travels with the bytes so parse failures can name the exact
/// document that was at fault, whichever layer supplied it.
#[derive(Debug, Clone)]
struct Document {
    key: String,
    bytes: Vec<u8>,
}

/// A fully assembled package definition for one concrete version.
#[derive(Debug, Clone)]
pub struct PackageDefinition {
    pub name: String,
    pub version: String,
    pub release: String,
    pub framework: bool,
    /// Captured from the merged configuration's reserved key, when a
    /// string value is present there.
    pub framework_name: Option<String>,
    command: Option<Document>,
    config_schema: Option<Document>,
    template: Option<Document>,
    metadata: Option<Document>,
    options: Option<Document>,
}

impl PackageDefinition {
    /// The required documents absent from every layer.
    ///
    /// `command`, the configuration schema, the deployment template, and
    /// the package metadata are required; a missing options document is
    /// normal and means "schema defaults only".
    pub fn missing_documents(&self) -> Vec<&'static str> {
        let slots = [
            (COMMAND_DOCUMENT, &self.command),
            (SCHEMA_DOCUMENT, &self.config_schema),
            (TEMPLATE_DOCUMENT, &self.template),
            (METADATA_DOCUMENT, &self.metadata),
        ];
        slots
            .into_iter()
            .filter(|(_, doc)| doc.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    /// Whether every required document is present.
    pub fn is_valid(&self) -> bool {
        self.missing_documents().is_empty()
    }

    /// Presence of each descriptor document, in collection order.
    pub fn document_presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            (COMMAND_DOCUMENT, self.command.is_some()),
            (SCHEMA_DOCUMENT, self.config_schema.is_some()),
            (TEMPLATE_DOCUMENT, self.template.is_some()),
            (METADATA_DOCUMENT, self.metadata.is_some()),
            (OPTIONS_DOCUMENT, self.options.is_some()),
        ]
    }

    /// Parse the configuration schema document.
    ///
    /// An absent schema parses as an empty schema node.
    pub fn config_schema(&self) -> Result<ConfigSchemaNode> {
        match &self.config_schema {
            None => Ok(ConfigSchemaNode::default()),
            Some(doc) => {
                serde_json::from_slice(&doc.bytes).map_err(|err| Error::SchemaParse {
                    key: doc.key.clone(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// Parse the options document into an override object.
    ///
    /// An absent or empty document is an empty override object, not an
    /// error.
    pub fn options(&self) -> Result<Map<String, JsonValue>> {
        match &self.options {
            None => Ok(Map::new()),
            Some(doc) => {
                serde_json::from_slice(&doc.bytes).map_err(|err| Error::OptionsParse {
                    key: doc.key.clone(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// The final configuration: schema defaults overlaid with explicit
    /// options.
    pub fn merged_config(&self) -> Result<Map<String, JsonValue>> {
        let schema = self.config_schema()?;
        let options = self.options()?;

        let mut config = JsonValue::Object(schema.defaults());
        merge_values(&mut config, &JsonValue::Object(options));

        match config {
            JsonValue::Object(map) => Ok(map),
            _ => unreachable!("merge of two objects yields an object"),
        }
    }

    /// Render the deployment template with the merged configuration.
    pub fn rendered_descriptor(&self) -> Result<String> {
        let template = self.template.as_ref().ok_or(Error::IncompleteDefinition {
            name: self.name.clone(),
            version: self.version.clone(),
            missing: TEMPLATE_DOCUMENT.to_string(),
        })?;

        let text = String::from_utf8_lossy(&template.bytes);
        let config = JsonValue::Object(self.merged_config()?);
        render_descriptor(&text, &config, &template.key)
    }
}

/// Collect the descriptor documents for `(package, version)` across the
/// full layer stack.
///
/// Layers are visited base first, then overrides in ascending index
/// order; within each layer every document is read and a present,
/// non-empty value replaces the one collected so far. A failed read
/// degrades to "absent at this layer" with a warning so one flaky layer
/// cannot block resolution of documents other layers supply.
pub fn assemble(
    store: &dyn KvStore,
    layers: &LayerSet,
    package: &Package,
    version: &PackageVersion,
) -> Result<PackageDefinition> {
    let root = layers.root();
    let version_key = package.package_version_key(&version.release_index);

    let mut definition = PackageDefinition {
        name: package.name.clone(),
        version: version.version.clone(),
        release: version.release_index.clone(),
        framework: package.framework,
        framework_name: None,
        command: None,
        config_schema: None,
        template: None,
        metadata: None,
        options: None,
    };

    for layer in layers.all() {
        let prefix = format!("{}/{}", layer.packages_key(root), version_key);

        for document in DESCRIPTOR_DOCUMENTS {
            let key = format!("{}/{}", prefix, document);
            let Some(read) = read_document(store, &key) else {
                continue;
            };

            debug!("Collected {} from layer {}", document, layer.index);
            let slot = match document {
                COMMAND_DOCUMENT => &mut definition.command,
                SCHEMA_DOCUMENT => &mut definition.config_schema,
                TEMPLATE_DOCUMENT => &mut definition.template,
                METADATA_DOCUMENT => &mut definition.metadata,
                _ => &mut definition.options,
            };
            *slot = Some(read);
        }
    }

    // Capture the framework name the merged configuration designates, if
    // any; parse failures in either source document surface here.
    let config = definition.merged_config()?;
    if let Some(JsonValue::String(name)) = config.get(FRAMEWORK_NAME_KEY) {
        definition.framework_name = Some(name.clone());
    }

    Ok(definition)
}

/// Read one descriptor document, degrading failures and empty values to
/// absent.
fn read_document(store: &dyn KvStore, key: &str) -> Option<Document> {
    match store.get(key) {
        Ok(Some(bytes)) if !bytes.is_empty() => Some(Document {
            key: key.to_string(),
            bytes,
        }),
        Ok(_) => None,
        Err(err) => {
            warn!("Could not retrieve {}: {}", key, err);
            None
        }
    }
}

/// Resolve a package definition by name and (possibly empty) requested
/// version.
///
/// `Ok(None)` means the package does not exist in the catalog. A
/// non-empty requested version is matched exactly (case-insensitive,
/// trimmed) against the package's versions; when it does not match, and
/// always for an empty request, the version with the greatest release
/// index across all versions is used instead. The assembled definition
/// must carry every required document.
pub fn resolve_definition(
    store: &dyn KvStore,
    layers: &LayerSet,
    name: &str,
    version: &str,
) -> Result<Option<PackageDefinition>> {
    let catalog = Catalog::new(store, layers);

    let Some(package) = catalog.find_by_name(name)? else {
        return Ok(None);
    };

    let resolved = match package.find_version(version) {
        Some(found) => found,
        None => package
            .latest_version()
            .ok_or_else(|| Error::NoInstallableVersion {
                package: package.name.clone(),
            })?,
    };

    let definition = assemble(store, layers, &package, resolved)?;

    let missing = definition.missing_documents();
    if !missing.is_empty() {
        return Err(Error::IncompleteDefinition {
            name: definition.name,
            version: definition.version,
            missing: missing.join(", "),
        });
    }

    Ok(Some(definition))
}
