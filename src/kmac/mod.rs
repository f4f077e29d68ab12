//! KMAC knowledge statements.
//!
//! Every statement kind is a plain owned record that refers to other
//! statements by string id only. [`Statement`] is the closed sum over all
//! kinds; [`StatementRecord`] is the capability every kind exposes to
//! consumers such as printers (`id`, `kind`, canonical line via `Display`).
//!
//! Constructors fail on malformed identifiers. Required-field checks live in
//! [`validation::validate_statement`] and cross-references are only checked by
//! the owning collection or store.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use serde::Serialize;

pub mod assertion;
pub mod entities;
pub mod identifier;
pub mod links;
pub mod validation;

pub use assertion::{Assertion, Confidence};
pub use entities::{Entity, Event, Relation, TimeKind, TimeReference};
pub use links::{Causation, CausationType, PartOf, Temporal, TemporalState};
pub use validation::validate_statement;

/// Discriminant of a [`Statement`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StatementKind {
    Entity,
    Relation,
    Assertion,
    Event,
    TimeReference,
    Temporal,
    PartOf,
    Causation,
}

impl StatementKind {
    pub const ALL: [Self; 8] = [
        Self::Entity,
        Self::Relation,
        Self::Assertion,
        Self::Event,
        Self::TimeReference,
        Self::Temporal,
        Self::PartOf,
        Self::Causation,
    ];

    /// Fixed type tag used in serialized lines and statistics.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Entity => "DEF_ENTITY",
            Self::Relation => "DEF_RELATION",
            Self::Assertion => "ASSERT",
            Self::Event => "DEF_EVENT",
            Self::TimeReference => "DEF_TIME",
            Self::Temporal => "TEMPORAL",
            Self::PartOf => "PART_OF",
            Self::Causation => "CAUSATION",
        }
    }

    /// Human readable name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Relation => "relation",
            Self::Assertion => "assertion",
            Self::Event => "event",
            Self::TimeReference => "time reference",
            Self::Temporal => "temporal",
            Self::PartOf => "part-of",
            Self::Causation => "causation",
        }
    }

    /// Single letter every identifier of this kind starts with.
    ///
    /// Link kinds derive their identifiers from their endpoints and have no
    /// prefix.
    #[must_use]
    pub fn id_prefix(self) -> Option<char> {
        match self {
            Self::Entity => Some('E'),
            Self::Relation => Some('R'),
            Self::Assertion => Some('F'),
            Self::Event => Some('V'),
            Self::TimeReference => Some('T'),
            Self::Temporal | Self::PartOf | Self::Causation => None,
        }
    }
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Capability shared by every statement kind.
pub trait StatementRecord: Display {
    fn id(&self) -> &str;

    fn kind(&self) -> StatementKind;

    fn type_tag(&self) -> &'static str {
        self.kind().tag()
    }
}

/// Ordered string-to-string property bag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Sets a property, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Closed sum over all statement kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Entity(Entity),
    Relation(Relation),
    Assertion(Assertion),
    Event(Event),
    TimeReference(TimeReference),
    Temporal(Temporal),
    PartOf(PartOf),
    Causation(Causation),
}

impl Statement {
    fn record(&self) -> &dyn StatementRecord {
        match self {
            Self::Entity(inner) => inner,
            Self::Relation(inner) => inner,
            Self::Assertion(inner) => inner,
            Self::Event(inner) => inner,
            Self::TimeReference(inner) => inner,
            Self::Temporal(inner) => inner,
            Self::PartOf(inner) => inner,
            Self::Causation(inner) => inner,
        }
    }

    #[must_use]
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_assertion(&self) -> Option<&Assertion> {
        match self {
            Self::Assertion(assertion) => Some(assertion),
            _ => None,
        }
    }

    pub fn as_assertion_mut(&mut self) -> Option<&mut Assertion> {
        match self {
            Self::Assertion(assertion) => Some(assertion),
            _ => None,
        }
    }
}

impl StatementRecord for Statement {
    fn id(&self) -> &str {
        self.record().id()
    }

    fn kind(&self) -> StatementKind {
        self.record().kind()
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.record(), f)
    }
}

impl From<Entity> for Statement {
    fn from(value: Entity) -> Self {
        Self::Entity(value)
    }
}

impl From<Relation> for Statement {
    fn from(value: Relation) -> Self {
        Self::Relation(value)
    }
}

impl From<Assertion> for Statement {
    fn from(value: Assertion) -> Self {
        Self::Assertion(value)
    }
}

impl From<Event> for Statement {
    fn from(value: Event) -> Self {
        Self::Event(value)
    }
}

impl From<TimeReference> for Statement {
    fn from(value: TimeReference) -> Self {
        Self::TimeReference(value)
    }
}

impl From<Temporal> for Statement {
    fn from(value: Temporal) -> Self {
        Self::Temporal(value)
    }
}

impl From<PartOf> for Statement {
    fn from(value: PartOf) -> Self {
        Self::PartOf(value)
    }
}

impl From<Causation> for Statement {
    fn from(value: Causation) -> Self {
        Self::Causation(value)
    }
}
