use thiserror::Error;

/// Failures surfaced by the options codec and the descriptor builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OptionsError {
    /// The text is not a well-formed `<options>` record.
    #[error("malformed options record: {0}")]
    MalformedInput(String),

    /// One of `id`, `badge`, `at` is absent.
    #[error("missing required attribute `{0}`")]
    MissingRequiredField(&'static str),

    /// A required attribute is present but not an integer of the expected width.
    #[error("attribute `{field}` is not a valid integer: {value:?}")]
    InvalidFieldValue { field: &'static str, value: String },

    /// The descriptor cannot be turned into a well-formed record.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("failed to write options record: {0}")]
    Emit(String),
}

/// Failures loading [`CodecConfig`](crate::config::CodecConfig) from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
