//! # Render Command Implementation
//!
//! This module implements the `render` subcommand, which resolves a
//! package version, assembles its descriptor documents across the layer
//! stack, merges the configuration, and prints the rendered deployment
//! descriptor. This is the outward product of the resolver: the text a
//! deployment submitter would send on.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::commands::show::unknown_package_error;
use layerpack::definition::resolve_definition;
use layerpack::layer::{LayerSet, DEFAULT_STORE_ROOT};
use layerpack::store::DirStore;

/// Render the deployment descriptor for a package version
#[derive(Args, Debug)]
pub struct RenderArgs {
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
}

/// Execute the `render` command.
pub fn execute(args: RenderArgs) -> Result<()> {
    let store = DirStore::new(&args.store);
    let layers = LayerSet::load(&store, &args.store_root)?;

    let definition = match resolve_definition(&store, &layers, &args.name, &args.version)? {
        Some(definition) => definition,
        None => return Err(unknown_package_error(&store, &layers, &args.name)),
    };

    println!("{}", definition.rendered_descriptor()?);

    Ok(())
}
