//! Keyed container for KMAC statements.
//!
//! [`StatementCollection::add`] is fail-closed per statement, while
//! [`StatementCollection::validate`] performs the cross-reference pass and
//! only reports warnings.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    kmac::{validate_statement, Assertion, Statement, StatementKind, StatementRecord},
    Error, Result,
};

pub mod builder;

pub use builder::StatementBuilder;

/// Relation names assertions may use without a registered [`crate::kmac::Relation`].
pub const BUILTIN_RELATIONS: [&str; 4] = ["AGENT", "LOCATION", "OCCURRED_AT", "INSTANCE_OF"];

/// Statement counts per type tag.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CollectionStatistics {
    pub by_type: BTreeMap<&'static str, usize>,
    pub total: usize,
}

impl CollectionStatistics {
    #[must_use]
    pub fn count(&self, kind: StatementKind) -> usize {
        self.by_type.get(kind.tag()).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatementCollection {
    statements: BTreeMap<String, Statement>,
}

impl StatementCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statement after validating its required fields.
    ///
    /// Identifiers are unique: adding a second statement with the same id
    /// fails with [`Error::Duplicate`].
    pub fn add(&mut self, statement: impl Into<Statement>) -> Result<()> {
        let statement = statement.into();
        validate_statement(&statement)?;
        let id = statement.id().to_owned();
        if self.statements.contains_key(&id) {
            return Err(Error::duplicate(&id));
        }
        debug!(id = %id, kind = %statement.kind(), "statement_added");
        self.statements.insert(id, statement);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Statement> {
        self.statements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Statement> {
        self.statements.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Statement> {
        self.statements.remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.statements.contains_key(id)
    }

    /// All statements ordered by id.
    pub fn all(&self) -> impl Iterator<Item = &Statement> {
        self.statements.values()
    }

    #[must_use]
    pub fn by_kind(&self, kind: StatementKind) -> Vec<&Statement> {
        self.all()
            .filter(|statement| statement.kind() == kind)
            .collect()
    }

    #[must_use]
    pub fn by_prefix(&self, prefix: &str) -> Vec<&Statement> {
        self.statements
            .range(prefix.to_owned()..)
            .take_while(|(id, _)| id.starts_with(prefix))
            .map(|(_, statement)| statement)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn clear(&mut self) {
        self.statements.clear();
    }

    #[must_use]
    pub fn statistics(&self) -> CollectionStatistics {
        let mut stats = CollectionStatistics::default();
        for statement in self.all() {
            *stats.by_type.entry(statement.type_tag()).or_insert(0) += 1;
            stats.total += 1;
        }
        stats
    }

    /// Serializes every statement, one line each, ordered by id.
    ///
    /// Assertions whose confidence differs from the default are followed by
    /// their `CONFIDENCE` line.
    #[must_use]
    pub fn export(&self) -> String {
        let mut lines = Vec::with_capacity(self.statements.len());
        for statement in self.all() {
            lines.push(statement.to_string());
            if let Some(assertion) = statement.as_assertion() {
                if !assertion.confidence().is_default() {
                    lines.push(assertion.confidence_line());
                }
            }
        }
        lines.join("\n")
    }

    /// Re-validates every statement and checks assertion references.
    ///
    /// Subjects and objects must name registered entities; relations must name
    /// a registered relation or one of [`BUILTIN_RELATIONS`]. Problems are
    /// returned as warnings and never alter the collection.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for statement in self.all() {
            if let Err(err) = validate_statement(statement) {
                warnings.push(err.to_string());
            }
            if let Some(assertion) = statement.as_assertion() {
                self.check_references(assertion, &mut warnings);
            }
        }
        for warning in &warnings {
            warn!(warning = %warning, "collection_validation_warning");
        }
        warnings
    }

    fn check_references(&self, assertion: &Assertion, warnings: &mut Vec<String>) {
        let is_entity = |id: &str| self.get(id).and_then(Statement::as_entity).is_some();
        let id = assertion.id();

        if !is_entity(assertion.subject()) {
            warnings.push(format!(
                "assertion `{id}` references unknown subject entity `{}`",
                assertion.subject()
            ));
        }
        if !is_entity(assertion.object()) {
            warnings.push(format!(
                "assertion `{id}` references unknown object entity `{}`",
                assertion.object()
            ));
        }

        let relation = assertion.relation();
        let registered = self.get(relation).and_then(Statement::as_relation).is_some();
        if !registered && !BUILTIN_RELATIONS.contains(&relation) {
            warnings.push(format!(
                "assertion `{id}` references unknown relation `{relation}`"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmac::{Entity, PartOf, Relation};

    fn sample() -> StatementCollection {
        let mut collection = StatementCollection::new();
        collection
            .add(Entity::new("E2", "Moon", "00C3-SOL-PLN-MON").expect("entity"))
            .expect("added");
        collection
            .add(Entity::new("E1", "Earth", "00C3-SOL-PLN-EAR").expect("entity"))
            .expect("added");
        collection
            .add(Relation::new("R1", "orbits", "SPATIAL").expect("relation"))
            .expect("added");
        collection
            .add(Assertion::new("F1", "E2", "R1", "E1").expect("assertion"))
            .expect("added");
        collection
    }

    #[test]
    fn rejects_invalid_and_duplicate_statements() {
        let mut collection = sample();
        let err = collection
            .add(Entity::new("E3", "", "").expect("entity"))
            .expect_err("missing label");
        assert!(matches!(err, Error::RequiredField { field: "label", .. }));

        collection.add(PartOf::new("E2", "E1")).expect("first part-of");
        let err = collection
            .add(PartOf::new("E2", "E1"))
            .expect_err("same pair collides");
        assert!(matches!(err, Error::Duplicate { id } if id == "PO_E2_E1"));
        assert_eq!(collection.len(), 5);
    }

    #[test]
    fn filters_by_kind_and_prefix() {
        let collection = sample();
        let entities: Vec<&str> = collection
            .by_kind(StatementKind::Entity)
            .into_iter()
            .map(StatementRecord::id)
            .collect();
        assert_eq!(entities, vec!["E1", "E2"]);
        assert_eq!(collection.by_prefix("R").len(), 1);
        assert_eq!(collection.by_prefix("E").len(), 2);
        assert!(collection.by_prefix("X").is_empty());
    }

    #[test]
    fn statistics_count_each_tag() {
        let stats = sample().statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.count(StatementKind::Entity), 2);
        assert_eq!(stats.count(StatementKind::Assertion), 1);
        assert_eq!(stats.count(StatementKind::Causation), 0);
        let json = serde_json::to_value(&stats).expect("serializable");
        assert_eq!(json["by_type"]["DEF_RELATION"], 1);
    }

    #[test]
    fn export_is_sorted_and_includes_confidence() {
        let mut collection = sample();
        collection
            .get_mut("F1")
            .and_then(Statement::as_assertion_mut)
            .expect("assertion")
            .set_confidence(0.75, "ephemeris");
        let exported = collection.export();
        let lines: Vec<&str> = exported.lines().collect();
        assert_eq!(
            lines,
            vec![
                "DEF_ENTITY #E1 [Earth] type=[00C3-SOL-PLN-EAR]",
                "DEF_ENTITY #E2 [Moon] type=[00C3-SOL-PLN-MON]",
                "ASSERT #F1 subject=[#E2] relation=[#R1] object=[#E1]",
                "CONFIDENCE #F1 level=[0.7500] source=[ephemeris]",
                "DEF_RELATION #R1 [orbits] type=[SPATIAL]",
            ]
        );
    }

    #[test]
    fn validation_reports_unresolved_references() {
        let mut collection = sample();
        assert!(collection.validate().is_empty());

        collection
            .add(Assertion::new("F2", "E9", "LOCATION", "E1").expect("assertion"))
            .expect("stored despite dangling subject");
        collection
            .add(Assertion::new("F3", "E1", "R_UNKNOWN", "literal").expect("assertion"))
            .expect("stored despite unknown relation");

        let warnings = collection.validate();
        assert_eq!(warnings.len(), 3, "{warnings:#?}");
        assert!(warnings[0].contains("`E9`"));
        assert!(warnings[1].contains("`literal`"));
        assert!(warnings[2].contains("`R_UNKNOWN`"));
    }

    #[test]
    fn removal_returns_the_statement_and_frees_its_id() {
        let mut collection = sample();
        let removed = collection.remove("E1").expect("present");
        assert_eq!(removed.id(), "E1");
        assert!(!collection.contains("E1"));
        assert_eq!(collection.len(), 3);
        assert!(collection.remove("E1").is_none());

        let warnings = collection.validate();
        assert!(warnings.iter().any(|warning| warning.contains("`E1`")));

        collection
            .add(Entity::new("E1", "Earth", "00C3-SOL-PLN-EAR").expect("entity"))
            .expect("id is free again");
        assert!(collection.validate().is_empty());
    }
}
