//! # Configuration Schema
//!
//! The `config.json` descriptor document is a JSON-Schema-like tree of
//! property groups. The resolver uses it for exactly one thing: extracting
//! the tree of declared default values that explicit options are merged
//! over. Type and constraint validation of the merged configuration is out
//! of scope.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// One node of the configuration schema tree.
///
/// Nodes of kind `"object"` group further properties; any other kind is a
/// scalar leaf. Never mutated after parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigSchemaNode {
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub additional_properties: bool,
    pub properties: BTreeMap<String, ConfigSchemaNode>,
    pub required: Vec<String>,
    pub minimum: Option<serde_json::Number>,
    pub default: Option<JsonValue>,
}

impl ConfigSchemaNode {
    /// Extract the tree of declared defaults.
    ///
    /// For each property: a declared `default` is emitted verbatim; an
    /// `"object"` kind without one recurses and emits the (possibly empty)
    /// nested defaults object; anything else contributes no entry.
    pub fn defaults(&self) -> Map<String, JsonValue> {
        let mut defaults = Map::new();

        for (name, child) in &self.properties {
            if let Some(value) = &child.default {
                // TODO: coerce the default to the declared kind before emitting
                defaults.insert(name.clone(), value.clone());
            } else if child.kind == "object" {
                defaults.insert(name.clone(), JsonValue::Object(child.defaults()));
            }
        }

        defaults
    }
}
