//! Configuration for the logger and the taxonomy lookup table.
//!
//! Both sections are optional in YAML; omitted sections fall back to their
//! defaults, which for the taxonomy is the built-in domain/type/scope table.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top level configuration document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    pub taxonomy: TaxonomySettings,
}

impl Config {
    /// Parses a YAML configuration document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
}

/// Logger settings consumed by [`crate::logger::init`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub enable: bool,
    pub level: LogLevel,
    pub format: LogFormat,
    /// Raw `EnvFilter` directives replacing the level-based default.
    pub override_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            enable: true,
            level: LogLevel::Info,
            format: LogFormat::Compact,
            override_filter: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(text)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Serializable description of the domain/type/scope lookup table.
///
/// `domains` and `types` are keyed by a single digit, `scopes` by the two
/// digit taxonomy code and then by the netmask letter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomySettings {
    pub domains: BTreeMap<String, String>,
    pub types: BTreeMap<String, String>,
    pub scopes: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for TaxonomySettings {
    fn default() -> Self {
        fn labels(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
            entries
                .iter()
                .map(|(key, label)| ((*key).to_string(), (*label).to_string()))
                .collect()
        }

        let scopes = [
            (
                "00",
                labels(&[
                    ("A", "Cosmic Scale"),
                    ("B", "Stellar Scale"),
                    ("C", "Planetary Scale"),
                    ("D", "Regional Scale"),
                    ("E", "Local Scale"),
                    ("F", "Organism Scale"),
                    ("G", "Cellular Scale"),
                    ("H", "Molecular Scale"),
                ]),
            ),
            (
                "01",
                labels(&[
                    ("A", "Universal Law"),
                    ("B", "Natural Process"),
                    ("C", "Ecological Pattern"),
                    ("D", "Biological Function"),
                ]),
            ),
            (
                "10",
                labels(&[
                    ("A", "Global System"),
                    ("B", "Large Artifact"),
                    ("C", "Organization"),
                    ("D", "Facility"),
                    ("E", "Device"),
                    ("F", "Component"),
                ]),
            ),
            (
                "11",
                labels(&[
                    ("A", "Civilizational Concept"),
                    ("B", "Institution"),
                    ("C", "Cultural Practice"),
                    ("D", "Idea"),
                    ("E", "Information Artifact"),
                ]),
            ),
        ]
        .into_iter()
        .map(|(code, scopes)| (code.to_string(), scopes))
        .collect();

        Self {
            domains: labels(&[("0", "Celestial/Natural"), ("1", "Human/Artificial")]),
            types: labels(&[("0", "Physical/Material"), ("1", "Conceptual/Abstract")]),
            scopes,
        }
    }
}
