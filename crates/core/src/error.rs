use std::io;

/// Errors that can occur while analyzing declarations or emitting sources
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("Project misconfigured: {0}")]
    Misconfigured(#[from] ConfigurationError),

    #[error("Cannot resolve '{subject}': {reason}")]
    Resolution { subject: String, reason: String },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error aborts a whole generation run because the consuming
    /// project is set up wrong, as opposed to a single bad declaration.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Error::Misconfigured(_))
    }
}

/// Fatal project-level failures. Any of these aborts the run with no output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("capability interface '{interface}' is not defined by the program or any referenced module")]
    CapabilityNotResolved { interface: String },

    #[error("there is no reference to the '{module}' module")]
    LibraryNotReferenced { module: String },

    #[error("there can only be one reference to the '{module}' module, found {count}")]
    AmbiguousLibraryReference { module: String, count: usize },

    #[error("generated unit name '{hint_name}' is produced by more than one type")]
    DuplicateHintName { hint_name: String },
}

/// Result type alias for colorto operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the generated text color operation and the animation
/// primitives behind it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    /// The owner has no animation context yet, typically because it is not
    /// attached to a running window
    #[error("no animation context is available for the owner")]
    NoAnimationContext,

    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("the operation was cancelled")]
    Cancelled,

    #[error("the animation was dropped before it finished")]
    Interrupted,
}
