//! Unified error types for application launch and configuration.

use std::error::Error;
use std::fmt;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// Outcome of a failed parse of command-line tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// The user asked for usage information. Carries the text to display.
    HelpRequested(String),
    /// The tokens could not be parsed into valid parameters.
    ArgumentRejected(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HelpRequested(text) => write!(f, "{text}"),
            Self::ArgumentRejected(msg) => write!(f, "{msg}"),
        }
    }
}

impl Error for CliError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading, saving, or resolving configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    TomlSerialize(toml::ser::Error),
    Json(serde_json::Error),
    /// No loader exists for this file extension.
    Unsupported(String),
    /// Key (or dotted path) not present in any source.
    Missing(String),
    /// `key` is absent and both `key_env` and `key_eval` are set.
    Ambiguous(String),
    /// A `_eval` shell expression failed.
    Eval(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::TomlSerialize(e) => write!(f, "toml: {e}"),
            Self::Json(e) => write!(f, "json: {e}"),
            Self::Unsupported(ext) => write!(f, "unsupported config format `{ext}`"),
            Self::Missing(key) => write!(f, "`{key}` not found"),
            Self::Ambiguous(key) => write!(f, "`{key}` has more than one variant"),
            Self::Eval(msg) => write!(f, "eval: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::TomlSerialize(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

// ---------------------------------------------------------------------------
// AppError — top-level
// ---------------------------------------------------------------------------

/// Everything construction or `run()` can surface to the dispatcher.
#[derive(Debug)]
pub enum AppError {
    /// Usage information was requested; exits with `usage`.
    HelpRequested(String),
    /// Arguments were rejected; exits with `bad_argument`.
    ArgumentRejected(String),
    /// An external interrupt arrived; exits with `keyboard_interrupt`.
    Interrupted,
    /// Anything else. Never mapped to a catalog code.
    Fault(Box<dyn Error + Send + Sync>),
}

impl AppError {
    /// Wrap an application-defined failure as an unclassified fault.
    pub fn fault<E>(error: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self::Fault(error.into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HelpRequested(text) => write!(f, "{text}"),
            Self::ArgumentRejected(msg) => write!(f, "{msg}"),
            Self::Interrupted => write!(f, "interrupted"),
            Self::Fault(e) => write!(f, "{e}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fault(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<CliError> for AppError {
    fn from(e: CliError) -> Self {
        match e {
            CliError::HelpRequested(text) => Self::HelpRequested(text),
            CliError::ArgumentRejected(msg) => Self::ArgumentRejected(msg),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Fault(Box::new(e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Fault(Box::new(e))
    }
}
