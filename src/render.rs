//! # Descriptor Template Rendering
//!
//! Renders the deployment template document (`marathon.json`) with the
//! merged configuration. Rendering is a pure substitution: `{{key}}`
//! placeholders are replaced by the corresponding configuration values, and
//! a placeholder with no corresponding key renders as empty, which is the
//! engine's default behavior and not a failure. Only an unparseable
//! template is an error, and the error names the store key the template
//! came from.

use crate::error::{Error, Result};
use handlebars::Handlebars;
use serde_json::Value as JsonValue;

/// Render `template` with `config`, reporting failures against `key`.
pub fn render_descriptor(template: &str, config: &JsonValue, key: &str) -> Result<String> {
    let registry = Handlebars::new();
    registry
        .render_template(template, config)
        .map_err(|err| Error::TemplateParse {
            key: key.to_string(),
            message: err.to_string(),
        })
}
