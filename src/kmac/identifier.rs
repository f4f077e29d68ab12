use super::StatementKind;
use crate::{Error, Result};

/// Checks that `id` carries the prefix of `kind` plus at least one more
/// character.
///
/// Kinds without a prefix accept any non-empty id.
pub fn validate_identifier(kind: StatementKind, id: &str) -> Result<()> {
    let Some(prefix) = kind.id_prefix() else {
        return if id.is_empty() {
            Err(Error::required(kind.name(), id, "id"))
        } else {
            Ok(())
        };
    };

    let mut chars = id.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) if first == prefix => Ok(()),
        _ => Err(Error::InvalidIdentifier {
            kind: kind.name(),
            id: id.to_owned(),
            expected_prefix: prefix,
        }),
    }
}

/// Formats the `sequence`-th generated identifier for `kind`, e.g. `E0001`.
#[must_use]
pub fn sequential_identifier(kind: StatementKind, sequence: u32) -> Option<String> {
    kind.id_prefix()
        .map(|prefix| format!("{prefix}{sequence:04}"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StatementKind::Entity, "E1")]
    #[case(StatementKind::Entity, "E1001")]
    #[case(StatementKind::Relation, "R_HAS_PART")]
    #[case(StatementKind::Assertion, "F0001")]
    #[case(StatementKind::Event, "V9")]
    #[case(StatementKind::TimeReference, "T1969")]
    fn accepts_prefixed_ids(#[case] kind: StatementKind, #[case] id: &str) {
        validate_identifier(kind, id).expect("valid id");
    }

    #[rstest]
    #[case(StatementKind::Entity, "")]
    #[case(StatementKind::Entity, "E")]
    #[case(StatementKind::Entity, "R1")]
    #[case(StatementKind::Entity, "e1")]
    #[case(StatementKind::Assertion, "A1")]
    #[case(StatementKind::Event, "E1")]
    fn rejects_wrong_prefix_or_length(#[case] kind: StatementKind, #[case] id: &str) {
        let err = validate_identifier(kind, id).expect_err("invalid id");
        assert!(matches!(err, Error::InvalidIdentifier { expected_prefix, .. }
            if Some(expected_prefix) == kind.id_prefix()));
    }

    #[test]
    fn sequential_ids_are_zero_padded() {
        assert_eq!(
            sequential_identifier(StatementKind::Assertion, 7).as_deref(),
            Some("F0007")
        );
        assert_eq!(
            sequential_identifier(StatementKind::Entity, 12345).as_deref(),
            Some("E12345")
        );
        assert_eq!(sequential_identifier(StatementKind::PartOf, 1), None);
    }
}
