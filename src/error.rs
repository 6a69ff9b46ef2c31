//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `layerpack` library. It uses the `thiserror` library to create an
//! `Error` enum that covers all anticipated failure modes, providing clear
//! and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur while resolving packages. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!   Variants for malformed stored documents always carry the store key of
//!   the offending document.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library to simplify function signatures.
//!
//! Store-level probe failures during catalog construction are deliberately
//! *not* represented here: they are downgraded to "absent at this layer"
//! with a warning log and never abort a catalog build. Only failures on the
//! direct resolution path of a specifically requested package surface as an
//! `Error`.

use thiserror::Error;

/// Main error type for layerpack operations
#[derive(Error, Debug)]
pub enum Error {
    /// The store contains no base layer (index 0).
    ///
    /// Recoverable: there is simply nothing to resolve against.
    #[error("No base repository layer found under '{root}'")]
    BaseLayerNotFound { root: String },

    /// A package exists in the index but declares zero versions.
    #[error("Could not find installable version for '{package}'")]
    NoInstallableVersion { package: String },

    /// The base layer's package index could not be read or parsed.
    #[error("Package index error at {key}: {message}")]
    IndexParse { key: String, message: String },

    /// A configuration schema document is present but malformed.
    #[error("Could not parse configuration schema at {key}: {message}")]
    SchemaParse { key: String, message: String },

    /// An options document is present but malformed.
    #[error("Could not parse options document at {key}: {message}")]
    OptionsParse { key: String, message: String },

    /// A deployment template could not be parsed or rendered.
    #[error("Could not render template at {key}: {message}")]
    TemplateParse { key: String, message: String },

    /// A required descriptor document is absent from every layer.
    #[error("Incomplete definition for {name} {version}: missing {missing}")]
    IncompleteDefinition {
        name: String,
        version: String,
        missing: String,
    },

    /// A store read failed on the direct resolution path.
    #[error("Store read error at {key}: {message}")]
    Store { key: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
