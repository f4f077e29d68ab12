use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{identifier::validate_identifier, Properties, StatementKind, StatementRecord};
use crate::{Error, Result};

/// Classified thing the knowledge base talks about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entity {
    id: String,
    label: String,
    tosid_type: String,
    properties: Properties,
}

impl Entity {
    /// Creates an entity; `tosid_type` is kept verbatim and need not parse.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        tosid_type: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        validate_identifier(StatementKind::Entity, &id)?;
        Ok(Self {
            id,
            label: label.into(),
            tosid_type: tosid_type.into(),
            properties: Properties::default(),
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn tosid_type(&self) -> &str {
        &self.tosid_type
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.set(key, value);
    }

    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains(key)
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }
}

impl StatementRecord for Entity {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Entity
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DEF_ENTITY #{} [{}] type=[{}]",
            self.id, self.label, self.tosid_type
        )
    }
}

/// Named relation type that assertions refer to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Relation {
    id: String,
    label: String,
    relation_type: String,
    domain: Option<String>,
    range: Option<String>,
    properties: Properties,
}

impl Relation {
    pub const SYMMETRIC: &'static str = "symmetric";
    pub const TRANSITIVE: &'static str = "transitive";
    pub const REFLEXIVE: &'static str = "reflexive";

    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        validate_identifier(StatementKind::Relation, &id)?;
        Ok(Self {
            id,
            label: label.into(),
            relation_type: relation_type.into(),
            domain: None,
            range: None,
            properties: Properties::default(),
        })
    }

    /// Restricts the subjects this relation is meant for.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Restricts the objects this relation is meant for.
    #[must_use]
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn relation_type(&self) -> &str {
        &self.relation_type
    }

    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    #[must_use]
    pub fn range(&self) -> Option<&str> {
        self.range.as_deref()
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.properties.flag(Self::SYMMETRIC)
    }

    #[must_use]
    pub fn is_transitive(&self) -> bool {
        self.properties.flag(Self::TRANSITIVE)
    }

    #[must_use]
    pub fn is_reflexive(&self) -> bool {
        self.properties.flag(Self::REFLEXIVE)
    }

    pub fn set_flag(&mut self, key: &str, value: bool) {
        self.properties.set(key, value.to_string());
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

impl StatementRecord for Relation {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Relation
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DEF_RELATION #{} [{}] type=[{}]",
            self.id, self.label, self.relation_type
        )
    }
}

/// Temporal or process entity, classified like an [`Entity`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Event {
    id: String,
    label: String,
    tosid_type: String,
    properties: Properties,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        tosid_type: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        validate_identifier(StatementKind::Event, &id)?;
        Ok(Self {
            id,
            label: label.into(),
            tosid_type: tosid_type.into(),
            properties: Properties::default(),
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn tosid_type(&self) -> &str {
        &self.tosid_type
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

impl StatementRecord for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Event
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DEF_EVENT #{} [{}] type=[{}]",
            self.id, self.label, self.tosid_type
        )
    }
}

/// Shape of the value held by a [`TimeReference`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeKind {
    Timestamp,
    Duration,
    Interval,
}

impl Display for TimeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Timestamp => "TIMESTAMP",
            Self::Duration => "DURATION",
            Self::Interval => "INTERVAL",
        };
        f.write_str(text)
    }
}

impl FromStr for TimeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TIMESTAMP" => Ok(Self::Timestamp),
            "DURATION" => Ok(Self::Duration),
            "INTERVAL" => Ok(Self::Interval),
            other => Err(Error::InvalidTimeKind(other.to_string())),
        }
    }
}

/// Typed timestamp, duration or interval value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeReference {
    id: String,
    time_kind: TimeKind,
    value: String,
}

impl TimeReference {
    pub fn new(id: impl Into<String>, time_kind: TimeKind, value: impl Into<String>) -> Result<Self> {
        let id = id.into();
        validate_identifier(StatementKind::TimeReference, &id)?;
        Ok(Self {
            id,
            time_kind,
            value: value.into(),
        })
    }

    /// Creates a timestamp reference from a UTC instant, stored as RFC 3339.
    pub fn at(id: impl Into<String>, instant: DateTime<Utc>) -> Result<Self> {
        Self::new(id, TimeKind::Timestamp, instant.to_rfc3339())
    }

    #[must_use]
    pub fn time_kind(&self) -> TimeKind {
        self.time_kind
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Parses the value as an RFC 3339 instant for timestamp references.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        if self.time_kind != TimeKind::Timestamp {
            return None;
        }
        DateTime::parse_from_rfc3339(&self.value)
            .ok()
            .map(|instant| instant.with_timezone(&Utc))
    }
}

impl StatementRecord for TimeReference {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::TimeReference
    }
}

impl Display for TimeReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DEF_TIME #{} kind=[{}] value=[{}]",
            self.id, self.time_kind, self.value
        )
    }
}
