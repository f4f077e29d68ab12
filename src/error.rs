use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

use thiserror::Error;

/// Component of a TOSID code rejected by [`crate::tosid::Tosid::create`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TosidComponent {
    /// The two digit domain/type prefix.
    Taxonomy,
    /// The single letter scale indicator.
    Netmask,
    /// The triplet identifier with optional instance suffix.
    Identifier,
}

impl Display for TosidComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Taxonomy => "taxonomy code",
            Self::Netmask => "netmask indicator",
            Self::Identifier => "identifier",
        };
        f.write_str(name)
    }
}

/// Errors raised while constructing codes, statements and store records.
#[derive(Debug, Error)]
pub enum Error {
    /// The text is not a canonical TOSID string.
    #[error("invalid TOSID format `{value}`: {reason}")]
    Format { value: String, reason: String },

    /// A statement identifier is missing its prefix or is too short.
    #[error("invalid {kind} identifier `{id}`: expected prefix `{expected_prefix}` followed by at least one character")]
    InvalidIdentifier {
        kind: &'static str,
        id: String,
        expected_prefix: char,
    },

    /// One TOSID component failed validation.
    #[error("invalid {component} `{value}`: {reason}")]
    ComponentValidation {
        component: TosidComponent,
        value: String,
        reason: String,
    },

    /// A required statement field was empty.
    #[error("{kind} `{id}` is missing required field `{field}`")]
    RequiredField {
        kind: &'static str,
        id: String,
        field: &'static str,
    },

    /// A referenced record does not exist.
    #[error("{kind} `{id}` not found")]
    ReferenceNotFound { kind: &'static str, id: String },

    /// A record with the same identifier is already registered.
    #[error("`{id}` already exists")]
    Duplicate { id: String },

    #[error("unknown causation type `{0}`")]
    InvalidCausationType(String),

    #[error("unknown temporal state `{0}`")]
    InvalidTemporalState(String),

    #[error("unknown time reference kind `{0}`")]
    InvalidTimeKind(String),

    /// Configuration could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Reading a configuration file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The tracing subscriber could not be installed.
    #[error("logger initialization failed: {0}")]
    Logger(String),
}

impl Error {
    pub(crate) fn format(value: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn component(
        component: TosidComponent,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::ComponentValidation {
            component,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn required(kind: &'static str, id: &str, field: &'static str) -> Self {
        Self::RequiredField {
            kind,
            id: id.to_owned(),
            field,
        }
    }

    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        Self::ReferenceNotFound {
            kind,
            id: id.to_owned(),
        }
    }

    pub(crate) fn duplicate(id: &str) -> Self {
        Self::Duplicate { id: id.to_owned() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
