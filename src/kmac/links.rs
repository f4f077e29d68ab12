//! Link statements: temporal qualification, part-of edges and causation.
//!
//! Their identifiers are derived from the linked ids, so registering the same
//! link twice collides on the id.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{StatementKind, StatementRecord};
use crate::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemporalState {
    PointInTime,
    BeganAt,
    EndedAt,
    During,
    Before,
    After,
    Simultaneous,
}

impl TemporalState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PointInTime => "POINT_IN_TIME",
            Self::BeganAt => "BEGAN_AT",
            Self::EndedAt => "ENDED_AT",
            Self::During => "DURING",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::Simultaneous => "SIMULTANEOUS",
        }
    }
}

impl Display for TemporalState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemporalState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POINT_IN_TIME" => Ok(Self::PointInTime),
            "BEGAN_AT" => Ok(Self::BeganAt),
            "ENDED_AT" => Ok(Self::EndedAt),
            "DURING" => Ok(Self::During),
            "BEFORE" => Ok(Self::Before),
            "AFTER" => Ok(Self::After),
            "SIMULTANEOUS" => Ok(Self::Simultaneous),
            other => Err(Error::InvalidTemporalState(other.to_string())),
        }
    }
}

/// Qualifies an assertion with a temporal state and a time reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Temporal {
    id: String,
    assertion: String,
    state: TemporalState,
    time_reference: String,
    interval: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl Temporal {
    #[must_use]
    pub fn new(
        assertion: impl Into<String>,
        state: TemporalState,
        time_reference: impl Into<String>,
    ) -> Self {
        let assertion = assertion.into();
        let time_reference = time_reference.into();
        Self {
            id: format!("TM_{assertion}_{time_reference}"),
            assertion,
            state,
            time_reference,
            interval: None,
        }
    }

    /// Attaches an explicit interval. An interval whose start is after its
    /// end contains no instant.
    #[must_use]
    pub fn with_interval(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.interval = Some((start, end));
        self
    }

    #[must_use]
    pub fn assertion(&self) -> &str {
        &self.assertion
    }

    #[must_use]
    pub fn state(&self) -> TemporalState {
        self.state
    }

    #[must_use]
    pub fn time_reference(&self) -> &str {
        &self.time_reference
    }

    #[must_use]
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.interval
    }

    /// Whether `instant` falls inside the explicit interval, bounds included.
    #[must_use]
    pub fn is_active(&self, instant: DateTime<Utc>) -> bool {
        self.interval
            .is_some_and(|(start, end)| start <= instant && instant <= end)
    }

    /// Whether both explicit intervals share at least one instant.
    #[must_use]
    pub fn overlaps_with(&self, other: &Self) -> bool {
        match (self.interval, other.interval) {
            (Some((start, end)), Some((other_start, other_end))) => {
                start <= end
                    && other_start <= other_end
                    && start <= other_end
                    && other_start <= end
            }
            _ => false,
        }
    }
}

impl StatementRecord for Temporal {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Temporal
    }
}

impl Display for Temporal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TEMPORAL #{} state=[{}] timestamp=[{}]",
            self.assertion, self.state, self.time_reference
        )
    }
}

/// Directed part-to-whole edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartOf {
    id: String,
    part: String,
    whole: String,
}

impl PartOf {
    #[must_use]
    pub fn new(part: impl Into<String>, whole: impl Into<String>) -> Self {
        let part = part.into();
        let whole = whole.into();
        Self {
            id: format!("PO_{part}_{whole}"),
            part,
            whole,
        }
    }

    #[must_use]
    pub fn part(&self) -> &str {
        &self.part
    }

    #[must_use]
    pub fn whole(&self) -> &str {
        &self.whole
    }
}

impl StatementRecord for PartOf {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::PartOf
    }
}

impl Display for PartOf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PART_OF #{} whole=[#{}]", self.part, self.whole)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum CausationType {
    Enablement,
    Prevention,
    Triggering,
    Inhibition,
    Facilitation,
}

impl CausationType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enablement => "Enablement",
            Self::Prevention => "Prevention",
            Self::Triggering => "Triggering",
            Self::Inhibition => "Inhibition",
            Self::Facilitation => "Facilitation",
        }
    }
}

impl Display for CausationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CausationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enablement" => Ok(Self::Enablement),
            "Prevention" => Ok(Self::Prevention),
            "Triggering" => Ok(Self::Triggering),
            "Inhibition" => Ok(Self::Inhibition),
            "Facilitation" => Ok(Self::Facilitation),
            other => Err(Error::InvalidCausationType(other.to_string())),
        }
    }
}

/// Directed, typed causal edge between two assertions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Causation {
    id: String,
    source: String,
    target: String,
    causation_type: CausationType,
}

impl Causation {
    /// Builds a causation from a textual type, rejecting unknown types.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        causation_type: &str,
    ) -> Result<Self> {
        let causation_type = causation_type.parse()?;
        Ok(Self::typed(source, target, causation_type))
    }

    #[must_use]
    pub fn typed(
        source: impl Into<String>,
        target: impl Into<String>,
        causation_type: CausationType,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("CA_{source}_{target}"),
            source,
            target,
            causation_type,
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn causation_type(&self) -> CausationType {
        self.causation_type
    }
}

impl StatementRecord for Causation {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Causation
    }
}

impl Display for Causation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CAUSATION source=[#{}] target=[#{}] type=[{}]",
            self.source, self.target, self.causation_type
        )
    }
}
