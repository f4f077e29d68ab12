use super::{Statement, StatementRecord};
use crate::{Error, Result};

fn require(statement: &Statement, field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::required(
            statement.kind().name(),
            statement.id(),
            field,
        ))
    } else {
        Ok(())
    }
}

/// Checks that every required field of the statement is non-empty.
///
/// References to other statements are not resolved here.
pub fn validate_statement(statement: &Statement) -> Result<()> {
    require(statement, "id", statement.id())?;
    match statement {
        Statement::Entity(entity) => require(statement, "label", entity.label()),
        Statement::Relation(relation) => {
            require(statement, "label", relation.label())?;
            require(statement, "relation_type", relation.relation_type())
        }
        Statement::Assertion(assertion) => {
            require(statement, "subject", assertion.subject())?;
            require(statement, "relation", assertion.relation())?;
            require(statement, "object", assertion.object())
        }
        Statement::Event(event) => require(statement, "label", event.label()),
        Statement::TimeReference(time) => require(statement, "value", time.value()),
        Statement::Temporal(temporal) => {
            require(statement, "assertion", temporal.assertion())?;
            require(statement, "time_reference", temporal.time_reference())
        }
        Statement::PartOf(part_of) => {
            require(statement, "part", part_of.part())?;
            require(statement, "whole", part_of.whole())
        }
        Statement::Causation(causation) => {
            require(statement, "source", causation.source())?;
            require(statement, "target", causation.target())
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::kmac::{
        Assertion, Causation, CausationType, Entity, Event, PartOf, Relation, Temporal,
        TemporalState, TimeKind, TimeReference,
    };

    #[test]
    fn complete_statements_pass() {
        let statements: Vec<Statement> = vec![
            Entity::new("E1", "Sun", "").expect("entity").into(),
            Relation::new("R1", "orbits", "SPATIAL").expect("relation").into(),
            Assertion::new("F1", "E2", "R1", "E1").expect("assertion").into(),
            Event::new("V1", "Eclipse", "").expect("event").into(),
            TimeReference::new("T1", TimeKind::Timestamp, "2024-04-08T18:00:00Z")
                .expect("time")
                .into(),
            Temporal::new("F1", TemporalState::PointInTime, "T1").into(),
            PartOf::new("E2", "E3").into(),
            Causation::typed("F1", "F2", CausationType::Triggering).into(),
        ];
        for statement in &statements {
            validate_statement(statement).expect("complete statement");
        }
    }

    #[rstest]
    #[case(Entity::new("E1", " ", "").expect("entity").into(), "label")]
    #[case(Relation::new("R1", "orbits", "").expect("relation").into(), "relation_type")]
    #[case(Assertion::new("F1", "E1", "", "E2").expect("assertion").into(), "relation")]
    #[case(Assertion::new("F1", "E1", "R1", "").expect("assertion").into(), "object")]
    #[case(TimeReference::new("T1", TimeKind::Duration, "").expect("time").into(), "value")]
    #[case(Temporal::new("", TemporalState::After, "T1").into(), "assertion")]
    #[case(PartOf::new("E1", "").into(), "whole")]
    #[case(Causation::typed("", "F2", CausationType::Prevention).into(), "source")]
    fn reports_first_missing_field(#[case] statement: Statement, #[case] expected: &str) {
        let err = validate_statement(&statement).expect_err("missing field");
        assert!(
            matches!(err, Error::RequiredField { field, .. } if field == expected),
            "unexpected error: {err}"
        );
    }
}
