use std::fmt;
use std::path::PathBuf;

use shinkoku_core::ValidationError;

/// Error types for the command-line front end
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a file failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// An input or config file could not be parsed into the expected shape
    Parse { path: PathBuf, message: String },
    /// A result could not be serialized for output
    Serialize(serde_json::Error),
    /// Parsed input was rejected by the engine's validation
    Validation(ValidationError),
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        CliError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "IO error on {}: {source}", path.display()),
            CliError::Parse { path, message } => {
                write!(f, "Parse error in {}: {message}", path.display())
            }
            CliError::Serialize(err) => write!(f, "Serialization error: {err}"),
            CliError::Validation(err) => write!(f, "Invalid input: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io { source, .. } => Some(source),
            CliError::Serialize(err) => Some(err),
            CliError::Validation(err) => Some(err),
            CliError::Parse { .. } => None,
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Validation(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialize(err)
    }
}
