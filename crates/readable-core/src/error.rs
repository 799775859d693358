//! Error types for readable-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A configuration file named explicitly does not exist.
    #[error("configuration file not found: {0}")]
    MissingFile(Utf8PathBuf),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while turning a file or URL resource into readability metadata.
///
/// The calculator itself never fails; these come from the content extractor
/// sitting in front of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The content extractor this operation depends on is not ready.
    #[error("missing dependency: {name} is not ready")]
    MissingDependency {
        /// Name of the unavailable extractor.
        name: String,
    },

    /// A network request failed while resolving content or mimetype.
    ///
    /// Callers must propagate this so the host can retry later.
    #[error("network failure: {0}")]
    Network(String),

    /// The extractor could not produce content for the resource.
    #[error("extraction failed: {0}")]
    Failed(String),
}

impl ExtractionError {
    /// Whether this error must be surfaced rather than treated as
    /// "resource unsupported".
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingDependency { .. } | Self::Network(_))
    }
}

/// Result type alias using [`ExtractionError`].
pub type ExtractionResult<T> = Result<T, ExtractionError>;
