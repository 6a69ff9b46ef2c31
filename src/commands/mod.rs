//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `layerpack` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Every data command reads the repository through a directory-backed
//! store (`--store`, env `LAYERPACK_STORE`) so a local checkout behaves
//! like the real key-value store.

pub mod completions;
pub mod ls;
pub mod render;
pub mod show;
pub mod suggest;
