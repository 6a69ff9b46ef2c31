//! # Show Command Implementation
//!
//! This module implements the `show` subcommand, which resolves a package
//! version and prints its merged configuration: the configuration schema's
//! defaults overlaid with the explicit options document. With
//! `--documents` it instead lists which descriptor documents the layer
//! stack supplied for the resolved version.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::suggest;
use layerpack::catalog::Catalog;
use layerpack::definition::resolve_definition;
use layerpack::layer::{LayerSet, DEFAULT_STORE_ROOT};
use layerpack::store::DirStore;

/// Show the merged configuration for a package version
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Package name (case-insensitive).
    pub name: String,

    /// Version to resolve; defaults to the latest release.
    #[arg(short = 'V', long, value_name = "VERSION", default_value = "")]
    pub version: String,

    /// Directory serving the repository store layout.
    ///
    /// Can also be set with the `LAYERPACK_STORE` environment variable.
    #[arg(long, value_name = "DIR", env = "LAYERPACK_STORE")]
    pub store: PathBuf,

    /// Key prefix the repository layers live under.
    #[arg(
        long,
        value_name = "KEY",
        env = "LAYERPACK_STORE_ROOT",
        default_value = DEFAULT_STORE_ROOT
    )]
    pub store_root: String,

    /// List collected descriptor documents instead of the configuration.
    #[arg(long)]
    pub documents: bool,
}

/// Execute the `show` command.
pub fn execute(args: ShowArgs) -> Result<()> {
    let store = DirStore::new(&args.store);
    let layers = LayerSet::load(&store, &args.store_root)?;

    let definition = match resolve_definition(&store, &layers, &args.name, &args.version)? {
        Some(definition) => definition,
        None => return Err(unknown_package_error(&store, &layers, &args.name)),
    };

    if args.documents {
        println!(
            "{} {} (release {})",
            definition.name, definition.version, definition.release
        );
        for (document, present) in definition.document_presence() {
            println!(
                "  {:<13} {}",
                document,
                if present { "present" } else { "absent" }
            );
        }
        return Ok(());
    }

    let config = definition.merged_config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

/// Build a "package not found" error with a did-you-mean hint drawn from
/// the catalog.
pub(crate) fn unknown_package_error(
    store: &DirStore,
    layers: &LayerSet,
    name: &str,
) -> anyhow::Error {
    let names: Vec<String> = Catalog::new(store, layers)
        .list()
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.name)
        .collect();
    suggest::unknown_package(name.trim(), &names)
}
