//! Error types for learn-genie.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reference shown to users when they ask for a feature Genie cannot learn.
pub const FEATURE_BROWSER_URL: &str =
    "https://pubhub.devnetcloud.com/media/genie-feature-browser/docs/#/models";

/// Main error type for a module invocation.
///
/// Every variant is fatal: the invocation stops and the error is reported
/// as a single failure document.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing module parameter
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Capability manifest or feature/platform lookup errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Failures reported by the learning engine
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Snapshot comparison errors
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Parameter validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The argument document is not a JSON object
    #[error("Module arguments must be a JSON object: {message}")]
    MalformedArguments { message: String },

    /// A required parameter is absent
    #[error("missing required argument: {name}")]
    Missing { name: String },

    /// A parameter has the wrong type or shape
    #[error("The {name} parameter must be {expected}")]
    WrongType { name: String, expected: String },

    /// A parameter is outside its set of accepted values
    #[error("The {name} parameter must be one of {}, got '{value}'", .choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },

    /// Parameters the module does not know about
    #[error(
        "Unsupported parameters for (learn_genie) module: {}. Supported parameters include: {}",
        .names.join(", "),
        .supported.join(", ")
    )]
    Unsupported {
        names: Vec<String>,
        supported: Vec<String>,
    },
}

/// Capability catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The manifest location could not be determined
    #[error("Unable to locate the Genie ops manifest: {message}")]
    ManifestNotFound { message: String },

    /// The manifest exists but could not be read
    #[error("Unable to read the Genie ops manifest {}: {source}", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest content does not describe a catalog
    #[error("Malformed Genie ops manifest {}: {message}", .path.display())]
    ManifestMalformed { path: PathBuf, message: String },

    /// The feature is not in the catalog
    #[error(
        "The feature entered is not supported on the current version of Genie.\nCurrently supported features: {}\n{}",
        .known.join(", "),
        FEATURE_BROWSER_URL
    )]
    UnsupportedFeature { feature: String, known: Vec<String> },

    /// The feature exists but not for this OS
    #[error(
        "The feature '{feature}' is not supported on os '{os}'. Supported platforms: {}",
        .supported.join(", ")
    )]
    UnsupportedPlatform {
        feature: String,
        os: String,
        supported: Vec<String>,
    },
}

impl CatalogError {
    /// Whether this error comes from the installation rather than the caller's input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ManifestNotFound { .. }
                | Self::ManifestUnreadable { .. }
                | Self::ManifestMalformed { .. }
        )
    }
}

/// Errors raised while talking to the learning engine.
///
/// Collaborator messages are carried through untouched.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Transport or authentication failure
    #[error("{message}")]
    Connection { message: String },

    /// The engine connected but could not retrieve or parse the feature
    #[error("{message}")]
    Learn { message: String },

    /// The engine program could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Local workspace (testbed file, output directory) errors
    #[error("Session workspace error: {0}")]
    Workspace(#[from] io::Error),
}

/// Snapshot comparison errors.
#[derive(Error, Debug)]
pub enum DiffError {
    /// An exclusion is not a valid pattern
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidExclusion {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A snapshot could not be serialized for comparison
    #[error("Unable to serialize snapshot for comparison: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias using learn-genie's Error.
pub type Result<T> = std::result::Result<T, Error>;
