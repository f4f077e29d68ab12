use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::{identifier::validate_identifier, Properties, StatementKind, StatementRecord};
use crate::Result;

/// Confidence level in `[0, 1]` and where it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Confidence {
    level: f64,
    source: String,
}

impl Confidence {
    /// Clamps `level` into `[0, 1]`; NaN becomes `0`.
    #[must_use]
    pub fn new(level: f64, source: impl Into<String>) -> Self {
        let level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        };
        Self {
            level,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn level(&self) -> f64 {
        self.level
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Full certainty with no recorded source.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.level >= 1.0 && self.source.is_empty()
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self {
            level: 1.0,
            source: String::new(),
        }
    }
}

/// Subject-relation-object triple.
///
/// References are opaque strings: the object may be a literal rather than an
/// entity id, and nothing is resolved at construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Assertion {
    id: String,
    subject: String,
    relation: String,
    object: String,
    confidence: Confidence,
    negated: bool,
    properties: Properties,
}

impl Assertion {
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        validate_identifier(StatementKind::Assertion, &id)?;
        Ok(Self {
            id,
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
            confidence: Confidence::default(),
            negated: false,
            properties: Properties::default(),
        })
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    #[must_use]
    pub fn object(&self) -> &str {
        &self.object
    }

    #[must_use]
    pub fn confidence(&self) -> &Confidence {
        &self.confidence
    }

    pub fn set_confidence(&mut self, level: f64, source: impl Into<String>) {
        self.confidence = Confidence::new(level, source);
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn set_negated(&mut self, negated: bool) {
        self.negated = negated;
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    fn same_triple(&self, other: &Self) -> bool {
        self.subject == other.subject
            && self.relation == other.relation
            && self.object == other.object
    }

    /// Same triple with the same polarity.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.same_triple(other) && self.negated == other.negated
    }

    /// Same triple with opposite polarity.
    #[must_use]
    pub fn conflicts(&self, other: &Self) -> bool {
        self.same_triple(other) && self.negated != other.negated
    }

    /// Renders the `CONFIDENCE` line for this assertion.
    #[must_use]
    pub fn confidence_line(&self) -> String {
        format!(
            "CONFIDENCE #{} level=[{:.4}] source=[{}]",
            self.id, self.confidence.level, self.confidence.source
        )
    }
}

impl StatementRecord for Assertion {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> StatementKind {
        StatementKind::Assertion
    }
}

impl Display for Assertion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keyword = if self.negated { "NEGATE" } else { "ASSERT" };
        write!(
            f,
            "{keyword} #{} subject=[#{}] relation=[#{}] object=[#{}]",
            self.id, self.subject, self.relation, self.object
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn landed() -> Assertion {
        Assertion::new("F1", "E1002", "LOCATION", "E2001").expect("valid assertion")
    }

    #[rstest]
    #[case(0.85, 0.85)]
    #[case(1.5, 1.0)]
    #[case(-0.2, 0.0)]
    #[case(0.0, 0.0)]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 1.0)]
    fn confidence_is_clamped(#[case] input: f64, #[case] expected: f64) {
        let mut assertion = landed();
        assertion.set_confidence(input, "mission log");
        assert_eq!(assertion.confidence().level(), expected);
        assert_eq!(assertion.confidence().source(), "mission log");
    }

    #[test]
    fn defaults_to_full_confidence() {
        let assertion = landed();
        assert_eq!(assertion.confidence(), &Confidence::default());
        assert!(assertion.confidence().is_default());
        assert!(!assertion.is_negated());
    }

    #[test]
    fn negation_switches_keyword() {
        let mut assertion = landed();
        insta::assert_snapshot!(
            assertion.to_string(),
            @"ASSERT #F1 subject=[#E1002] relation=[#LOCATION] object=[#E2001]"
        );
        assertion.set_negated(true);
        insta::assert_snapshot!(
            assertion.to_string(),
            @"NEGATE #F1 subject=[#E1002] relation=[#LOCATION] object=[#E2001]"
        );
    }

    #[test]
    fn confidence_line_uses_four_decimals() {
        let mut assertion = landed();
        assertion.set_confidence(0.9, "NASA archive");
        assert_eq!(
            assertion.confidence_line(),
            "CONFIDENCE #F1 level=[0.9000] source=[NASA archive]"
        );
    }

    #[test]
    fn equivalence_and_conflict_depend_on_polarity() {
        let first = landed();
        let mut second = Assertion::new("F2", "E1002", "LOCATION", "E2001").expect("valid");
        assert!(first.is_equivalent(&second));
        assert!(!first.conflicts(&second));

        second.set_negated(true);
        assert!(!first.is_equivalent(&second));
        assert!(first.conflicts(&second));
        assert!(second.conflicts(&first));

        let other = Assertion::new("F3", "E1002", "LOCATION", "E9999").expect("valid");
        assert!(!first.is_equivalent(&other));
        assert!(!first.conflicts(&other));
    }

    #[test]
    fn object_may_be_a_literal() {
        let assertion = Assertion::new("F9", "E1", "MASS_KG", "1.989e30").expect("valid");
        assert_eq!(assertion.object(), "1.989e30");
        assert!(Assertion::new("E9", "E1", "R1", "E2").is_err());
    }
}
