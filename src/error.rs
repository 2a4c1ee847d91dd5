/// Error types for sqlx-named-sql
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The embedded configuration block is not valid TOML of the expected shape
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// A configuration key that must be an identifier holds something else
    #[error("Invalid configuration: `{key}` must be an identifier, got {value:?}")]
    InvalidName { key: &'static str, value: String },

    /// Error while compiling an internal pattern
    #[error("Failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Error from SQLx database operations
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// More distinct placeholders than PostgreSQL can bind
    #[error("Too many distinct named parameters: {0} (at most {max})", max = u16::MAX)]
    TooManyParameters(usize),

    /// The database described a different number of parameters than the lexer found
    #[error("Statement has {expected} named parameter(s) but the database described {actual}")]
    ParameterTypeCount { expected: usize, actual: usize },

    /// A parameter ordinal has no described type, or a type has no parameter
    #[error("Unable to match named parameter with prepared statement parameter ${0}")]
    UnmatchedParameterType(u16),

    /// The database reported a parameter count without concrete types
    #[error("Database did not describe parameter types for the statement")]
    ParameterTypesUnavailable,
}

/// Result type alias for sqlx-named-sql operations
pub type Result<T> = std::result::Result<T, Error>;
