//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the packages of
//! the layered repository together with their support status and resolved
//! current version.
//!
//! ## Functionality
//!
//! - **Catalog Listing**: Shows every package from the base layer's index
//! - **Support Filtering**: `--supported` restricts to packages some
//!   override layer supports
//! - **JSON Output**: `--json` emits the enriched catalog for scripting
//!
//! This command is a safe, read-only operation.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use layerpack::catalog::Catalog;
use layerpack::error::Error;
use layerpack::layer::{LayerSet, DEFAULT_STORE_ROOT};
use layerpack::output::{paint, OutputConfig};
use layerpack::store::DirStore;

/// List the packages of the layered repository
#[derive(Args, Debug)]
pub struct LsArgs {
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

    /// Show only packages with at least one supported version.
    #[arg(long)]
    pub supported: bool,

    /// Emit the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the `ls` command.
///
/// Builds the catalog against the directory store and prints one line per
/// package. A missing base layer is reported as "nothing to list", not an
/// error.
pub fn execute(args: LsArgs, output: &OutputConfig) -> Result<()> {
    let store = DirStore::new(&args.store);
    let layers = LayerSet::load(&store, &args.store_root)?;
    let catalog = Catalog::new(&store, &layers);

    let mut packages = match catalog.list() {
        Ok(packages) => packages,
        Err(Error::BaseLayerNotFound { root }) => {
            println!("No base repository layer under '{}'; nothing to list.", root);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if args.supported {
        packages.retain(|p| p.supported);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    if packages.is_empty() {
        println!("No packages found.");
        return Ok(());
    }

    let name_width = packages
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let version_width = packages
        .iter()
        .map(|p| p.current_version.len())
        .max()
        .unwrap_or(0)
        .max("CURRENT".len());

    println!(
        "{:<name_width$}  {:<version_width$}  {:<9}  DESCRIPTION",
        "NAME", "CURRENT", "SUPPORTED"
    );

    let yes = console::Style::new().green();
    let no = console::Style::new().dim();
    for package in &packages {
        let marker = if package.supported {
            paint(output, &yes, "yes")
        } else {
            paint(output, &no, "no")
        };
        println!(
            "{:<name_width$}  {:<version_width$}  {:<9}  {}",
            package.name, package.current_version, marker, package.description
        );
    }

    let supported_count = packages.iter().filter(|p| p.supported).count();
    println!();
    println!(
        "{} package(s), {} supported",
        packages.len(),
        supported_count
    );

    Ok(())
}
