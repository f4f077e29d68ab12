use std::collections::BTreeMap;

use super::StatementCollection;
use crate::{
    kmac::{
        identifier::sequential_identifier, Assertion, Entity, Event, Relation, Statement,
        StatementKind, TimeKind, TimeReference,
    },
    Error, Result,
};

/// Fluent front-end over [`StatementCollection`] generating sequential ids
/// (`E0001`, `R0001`, `F0001`, ...).
///
/// A counter only advances when the statement was actually stored. Ids
/// already taken by statements added with [`StatementBuilder::add`] are
/// skipped.
#[derive(Clone, Debug, Default)]
pub struct StatementBuilder {
    collection: StatementCollection,
    counters: BTreeMap<StatementKind, u32>,
}

impl StatementBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add_numbered<F>(&mut self, kind: StatementKind, build: F) -> Result<String>
    where
        F: FnOnce(String) -> Result<Statement>,
    {
        let mut sequence = self.counters.get(&kind).copied().unwrap_or(0) + 1;
        let id = loop {
            let id = sequential_identifier(kind, sequence)
                .ok_or_else(|| Error::required(kind.name(), "", "id"))?;
            if !self.collection.contains(&id) {
                break id;
            }
            sequence += 1;
        };
        self.collection.add(build(id.clone())?)?;
        self.counters.insert(kind, sequence);
        Ok(id)
    }

    pub fn add_entity(&mut self, label: &str, tosid_type: &str) -> Result<String> {
        self.add_numbered(StatementKind::Entity, |id| {
            Ok(Entity::new(id, label, tosid_type)?.into())
        })
    }

    pub fn add_relation(&mut self, label: &str, relation_type: &str) -> Result<String> {
        self.add_numbered(StatementKind::Relation, |id| {
            Ok(Relation::new(id, label, relation_type)?.into())
        })
    }

    pub fn add_assertion(&mut self, subject: &str, relation: &str, object: &str) -> Result<String> {
        self.add_numbered(StatementKind::Assertion, |id| {
            Ok(Assertion::new(id, subject, relation, object)?.into())
        })
    }

    pub fn add_event(&mut self, label: &str, tosid_type: &str) -> Result<String> {
        self.add_numbered(StatementKind::Event, |id| {
            Ok(Event::new(id, label, tosid_type)?.into())
        })
    }

    pub fn add_time_reference(&mut self, time_kind: TimeKind, value: &str) -> Result<String> {
        self.add_numbered(StatementKind::TimeReference, |id| {
            Ok(TimeReference::new(id, time_kind, value)?.into())
        })
    }

    /// Adds a statement carrying its own id, such as a link statement.
    pub fn add(&mut self, statement: impl Into<Statement>) -> Result<()> {
        self.collection.add(statement)
    }

    #[must_use]
    pub fn collection(&self) -> &StatementCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut StatementCollection {
        &mut self.collection
    }

    #[must_use]
    pub fn into_collection(self) -> StatementCollection {
        self.collection
    }

    /// Clears every statement and restarts all counters.
    pub fn reset(&mut self) {
        self.collection.clear();
        self.counters.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmac::{PartOf, StatementRecord};

    #[test]
    fn generates_sequential_ids_per_kind() {
        let mut builder = StatementBuilder::new();
        let earth = builder.add_entity("Earth", "00C3-SOL-PLN-EAR").expect("entity");
        let moon = builder.add_entity("Moon", "00C3-SOL-PLN-MON").expect("entity");
        let orbits = builder.add_relation("orbits", "SPATIAL").expect("relation");
        let fact = builder.add_assertion(&moon, &orbits, &earth).expect("assertion");
        let launch = builder.add_event("Launch", "10B2-SPC-MSN-APL").expect("event");
        let when = builder
            .add_time_reference(TimeKind::Timestamp, "1969-07-16T13:32:00Z")
            .expect("time");

        assert_eq!(earth, "E0001");
        assert_eq!(moon, "E0002");
        assert_eq!(orbits, "R0001");
        assert_eq!(fact, "F0001");
        assert_eq!(launch, "V0001");
        assert_eq!(when, "T0001");
        assert_eq!(builder.collection().len(), 6);
        assert!(builder.collection().validate().is_empty());
    }

    #[test]
    fn failed_additions_do_not_consume_ids() {
        let mut builder = StatementBuilder::new();
        assert!(builder.add_entity("", "").is_err());
        assert_eq!(builder.add_entity("Mars", "").expect("entity"), "E0001");
    }

    #[test]
    fn generated_ids_skip_manually_added_statements() {
        let mut builder = StatementBuilder::new();
        builder
            .add(Entity::new("E0001", "Manual", "").expect("entity"))
            .expect("manual entity");
        builder
            .add(Entity::new("E0003", "Also manual", "").expect("entity"))
            .expect("manual entity");

        assert_eq!(builder.add_entity("Auto", "").expect("entity"), "E0002");
        assert_eq!(builder.add_entity("Auto", "").expect("entity"), "E0004");
        assert!(builder.add_entity(" ", "").is_err());
        assert_eq!(builder.add_entity("Auto", "").expect("entity"), "E0005");
        assert_eq!(builder.collection().len(), 5);
    }

    #[test]
    fn reset_clears_statements_and_counters() {
        let mut builder = StatementBuilder::new();
        builder.add_entity("Earth", "").expect("entity");
        builder.add_entity("Moon", "").expect("entity");
        builder.add(PartOf::new("E0002", "E0001")).expect("part-of");
        assert_eq!(builder.collection().len(), 3);

        builder.reset();
        assert!(builder.collection().is_empty());
        assert_eq!(builder.add_entity("Sun", "").expect("entity"), "E0001");

        let collection = builder.into_collection();
        let ids: Vec<&str> = collection.all().map(StatementRecord::id).collect();
        assert_eq!(ids, vec!["E0001"]);
    }
}
