// actchat - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Line errors are recovered per line, file errors per file; only
// configuration errors abort a run.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for actchat operations that can abort a run.
#[derive(Debug)]
pub enum ChatLogError {
    /// Configuration loading or option resolution failed.
    Config(ConfigError),

    /// A file operation failed outside the per-file pipeline
    /// (for example opening the log file sink).
    File(FileError),
}

impl fmt::Display for ChatLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::File(e) => write!(f, "File error: {e}"),
        }
    }
}

impl std::error::Error for ChatLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::File(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// A single log line that could not be classified.
///
/// Always recoverable: the line is skipped and processing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line has fewer delimited fields than its record type requires.
    TooFewFields { found: usize, required: usize },

    /// The timestamp field does not match the ACT timestamp format.
    TimestampParse { raw_timestamp: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found, required } => {
                write!(f, "expected at least {required} fields, found {found}")
            }
            Self::TimestampParse { raw_timestamp } => {
                write!(f, "cannot parse timestamp '{raw_timestamp}'")
            }
        }
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// File errors
// ---------------------------------------------------------------------------

/// I/O failure scoped to one input file. Reported in that file's result;
/// the batch continues.
#[derive(Debug)]
pub enum FileError {
    /// The input log could not be opened or read.
    Read { path: PathBuf, source: io::Error },

    /// The transcript could not be written.
    Write { path: PathBuf, source: io::Error },

    /// The configured output directory could not be created.
    CreateDir { path: PathBuf, source: io::Error },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write '{}': {source}", path.display())
            }
            Self::CreateDir { path, source } => {
                write!(f, "cannot create directory '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. }
            | Self::Write { source, .. }
            | Self::CreateDir { source, .. } => Some(source),
        }
    }
}

impl From<FileError> for ChatLogError {
    fn from(e: FileError) -> Self {
        Self::File(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors in configuration or resolved run options. Fatal to the whole run
/// and raised before any input file is opened.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The selected group key is not defined.
    UnknownGroup { key: String, available: Vec<String> },

    /// A group was defined without any members.
    EmptyGroup { key: String },

    /// No input files were supplied.
    NoInputFiles,

    /// A value supplied on the command line is not usable.
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::UnknownGroup { key, available } => write!(
                f,
                "Unknown group '{key}'. Available groups: {}",
                available.join(", ")
            ),
            Self::EmptyGroup { key } => {
                write!(f, "Group '{key}' has no members")
            }
            Self::NoInputFiles => write!(f, "No input files were given"),
            Self::InvalidValue {
                field,
                value,
                expected,
            } => write!(f, "'{field}' = '{value}' is not valid. Expected: {expected}"),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for ChatLogError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_unknown_group_lists_available_keys() {
        let err = ConfigError::UnknownGroup {
            key: "raid".to_string(),
            available: vec!["everyone".to_string(), "party".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'raid'"));
        assert!(msg.contains("everyone, party"));
    }

    #[test]
    fn test_file_error_preserves_source_chain() {
        let err: ChatLogError = FileError::Write {
            path: PathBuf::from("out.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        let file_err = err.source().expect("top-level error should have a source");
        assert!(file_err.source().is_some(), "io::Error should be chained");
        assert!(err.to_string().contains("out.txt"));
    }
}
