//! Semantic store binding TOSID-classified entities to KMAC assertions.
//!
//! The write path is fail-closed only for what a single call can check:
//! malformed records, duplicate ids and, for assertions, unknown subject or
//! object entities. Everything spanning several records (dangling references
//! after removals, orphaned entities) is reported by
//! [`SemanticStore::validate_store`] instead.
//!
//! The store holds no locks; share it across threads behind a `Mutex` or
//! `RwLock`.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    collection::StatementCollection,
    kmac::{validate_statement, Assertion, Entity, Relation, Statement, StatementRecord},
    tosid::{ConsistencyWarning, TaxonomyTable, Tosid, TosidValidator},
    Error, Result,
};

/// An entity together with its parsed classification, if the code parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityReference {
    entity: Entity,
    tosid: Option<Tosid>,
}

impl EntityReference {
    #[must_use]
    pub fn id(&self) -> &str {
        self.entity.id()
    }

    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    #[must_use]
    pub fn tosid(&self) -> Option<&Tosid> {
        self.tosid.as_ref()
    }
}

/// Entities connected to a given entity, split by link direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RelatedEntities<'a> {
    /// Objects of assertions where the entity is the subject.
    pub outbound: Vec<&'a EntityReference>,
    /// Subjects of assertions where the entity is the object.
    pub inbound: Vec<&'a EntityReference>,
}

#[derive(Clone, Debug, Default)]
pub struct SemanticStore {
    validator: TosidValidator,
    entities: BTreeMap<String, EntityReference>,
    relations: BTreeMap<String, Relation>,
    assertions: BTreeMap<String, Assertion>,
}

impl SemanticStore {
    /// Creates an empty store using the built-in taxonomy table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store resolving classifications with `taxonomy`.
    #[must_use]
    pub fn with_taxonomy(taxonomy: TaxonomyTable) -> Self {
        Self {
            validator: TosidValidator::new(taxonomy),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn taxonomy(&self) -> &TaxonomyTable {
        self.validator.table()
    }

    /// Registers an entity, attaching its TOSID when `tosid_code` parses.
    ///
    /// An unparsable code is kept verbatim on the entity and the reference
    /// carries no TOSID; such entities never match classification patterns.
    pub fn add_entity(&mut self, id: &str, label: &str, tosid_code: &str) -> Result<()> {
        let entity = self.checked_entity(id, label, tosid_code)?;
        let tosid = match Tosid::parse(tosid_code) {
            Ok(tosid) => Some(tosid),
            Err(err) => {
                warn!(entity = %id, err.msg = %err, "entity_tosid_unparsed");
                None
            }
        };
        self.insert_entity(entity, tosid);
        Ok(())
    }

    /// Like [`Self::add_entity`] but fails when `tosid_code` does not parse.
    pub fn add_classified_entity(&mut self, id: &str, label: &str, tosid_code: &str) -> Result<()> {
        let entity = self.checked_entity(id, label, tosid_code)?;
        let tosid = Tosid::parse(tosid_code)?;
        self.insert_entity(entity, Some(tosid));
        Ok(())
    }

    fn checked_entity(&self, id: &str, label: &str, tosid_code: &str) -> Result<Entity> {
        let entity = Entity::new(id, label, tosid_code)?;
        if label.trim().is_empty() {
            return Err(Error::required("entity", id, "label"));
        }
        if self.entities.contains_key(id) {
            return Err(Error::duplicate(id));
        }
        Ok(entity)
    }

    fn insert_entity(&mut self, entity: Entity, tosid: Option<Tosid>) {
        let id = entity.id().to_owned();
        debug!(entity = %id, classified = tosid.is_some(), "entity_added");
        self.entities.insert(id, EntityReference { entity, tosid });
    }

    /// Registers a relation definition.
    pub fn add_relation(&mut self, relation: Relation) -> Result<()> {
        validate_statement(&Statement::from(relation.clone()))?;
        let id = relation.id().to_owned();
        if self.relations.contains_key(&id) {
            return Err(Error::duplicate(&id));
        }
        debug!(relation = %id, "relation_added");
        self.relations.insert(id, relation);
        Ok(())
    }

    /// Creates and stores an assertion between two registered entities.
    ///
    /// `relation_id` is not required to name a registered relation.
    pub fn create_assertion(
        &mut self,
        id: &str,
        subject_id: &str,
        relation_id: &str,
        object_id: &str,
    ) -> Result<()> {
        let assertion = Assertion::new(id, subject_id, relation_id, object_id)?;
        self.add_assertion(assertion)
    }

    /// Stores a prebuilt assertion under the same rules as
    /// [`Self::create_assertion`], keeping its confidence and negation.
    pub fn add_assertion(&mut self, assertion: Assertion) -> Result<()> {
        if !self.entities.contains_key(assertion.subject()) {
            return Err(Error::not_found("subject entity", assertion.subject()));
        }
        if !self.entities.contains_key(assertion.object()) {
            return Err(Error::not_found("object entity", assertion.object()));
        }
        validate_statement(&Statement::from(assertion.clone()))?;
        let id = assertion.id().to_owned();
        if self.assertions.contains_key(&id) {
            return Err(Error::duplicate(&id));
        }
        debug!(
            assertion = %id,
            subject = %assertion.subject(),
            relation = %assertion.relation(),
            object = %assertion.object(),
            "assertion_created"
        );
        self.assertions.insert(id, assertion);
        Ok(())
    }

    #[must_use]
    pub fn get_entity(&self, id: &str) -> Option<&EntityReference> {
        self.entities.get(id)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut EntityReference> {
        self.entities.get_mut(id)
    }

    #[must_use]
    pub fn get_relation(&self, id: &str) -> Option<&Relation> {
        self.relations.get(id)
    }

    #[must_use]
    pub fn get_assertion(&self, id: &str) -> Option<&Assertion> {
        self.assertions.get(id)
    }

    pub fn assertion_mut(&mut self, id: &str) -> Option<&mut Assertion> {
        self.assertions.get_mut(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityReference> {
        self.entities.values()
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    pub fn assertions(&self) -> impl Iterator<Item = &Assertion> {
        self.assertions.values()
    }

    /// Removes an entity. Assertions mentioning it are kept and show up as
    /// dangling in [`Self::validate_store`].
    pub fn remove_entity(&mut self, id: &str) -> Option<EntityReference> {
        let removed = self.entities.remove(id);
        if removed.is_some() {
            debug!(entity = %id, "entity_removed");
        }
        removed
    }

    pub fn remove_relation(&mut self, id: &str) -> Option<Relation> {
        self.relations.remove(id)
    }

    pub fn remove_assertion(&mut self, id: &str) -> Option<Assertion> {
        self.assertions.remove(id)
    }

    /// Entities whose parsed TOSID matches `pattern`.
    #[must_use]
    pub fn find_entities_by_tosid_pattern(&self, pattern: &str) -> Vec<&EntityReference> {
        self.entities()
            .filter(|reference| {
                reference
                    .tosid()
                    .is_some_and(|tosid| tosid.matches_pattern(pattern))
            })
            .collect()
    }

    /// Assertions naming `entity_id` as subject or object.
    #[must_use]
    pub fn find_assertions_for_entity(&self, entity_id: &str) -> Vec<&Assertion> {
        self.assertions()
            .filter(|assertion| assertion.subject() == entity_id || assertion.object() == entity_id)
            .collect()
    }

    /// Case-insensitive substring search over entity labels.
    #[must_use]
    pub fn find_entities_by_label(&self, needle: &str) -> Vec<&EntityReference> {
        let needle = needle.to_lowercase();
        self.entities()
            .filter(|reference| reference.entity().label().to_lowercase().contains(&needle))
            .collect()
    }

    /// Registered entities linked to `entity_id` by any assertion.
    #[must_use]
    pub fn find_related_entities(&self, entity_id: &str) -> RelatedEntities<'_> {
        let mut related = RelatedEntities::default();
        let mut seen_outbound = BTreeSet::new();
        let mut seen_inbound = BTreeSet::new();
        for assertion in self.assertions() {
            if assertion.subject() == entity_id && seen_outbound.insert(assertion.object()) {
                if let Some(target) = self.entities.get(assertion.object()) {
                    related.outbound.push(target);
                }
            }
            if assertion.object() == entity_id && seen_inbound.insert(assertion.subject()) {
                if let Some(source) = self.entities.get(assertion.subject()) {
                    related.inbound.push(source);
                }
            }
        }
        related
    }

    /// Counts per record kind plus a `taxonomy_<code>` count per observed
    /// taxonomy code.
    #[must_use]
    pub fn statistics(&self) -> BTreeMap<String, usize> {
        let mut stats = BTreeMap::from([
            ("entities".to_string(), self.entities.len()),
            ("relations".to_string(), self.relations.len()),
            ("assertions".to_string(), self.assertions.len()),
        ]);
        for tosid in self.entities().filter_map(EntityReference::tosid) {
            *stats
                .entry(format!("taxonomy_{}", tosid.taxonomy_code()))
                .or_insert(0) += 1;
        }
        stats
    }

    /// Human readable classification of an entity, resolved with the store's
    /// taxonomy table.
    #[must_use]
    pub fn describe_entity(&self, entity_id: &str) -> Option<String> {
        let tosid = self.entities.get(entity_id)?.tosid()?;
        Some(self.taxonomy().describe(tosid))
    }

    /// Heuristic classification warnings for every parsed TOSID.
    #[must_use]
    pub fn classification_warnings(&self) -> Vec<ConsistencyWarning> {
        self.entities()
            .filter_map(EntityReference::tosid)
            .flat_map(|tosid| self.validator.validate_semantic_consistency(tosid))
            .collect()
    }

    /// Advisory integrity check: dangling assertion endpoints and entities
    /// that take part in no assertion.
    #[must_use]
    pub fn validate_store(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut linked: BTreeSet<&str> = BTreeSet::new();

        for assertion in self.assertions() {
            for (role, entity_id) in [("subject", assertion.subject()), ("object", assertion.object())] {
                if self.entities.contains_key(entity_id) {
                    linked.insert(entity_id);
                } else {
                    warnings.push(format!(
                        "assertion `{}` references missing {role} entity `{entity_id}`",
                        assertion.id()
                    ));
                }
            }
        }

        for id in self.entities.keys() {
            if !linked.contains(id.as_str()) {
                warnings.push(format!("entity `{id}` is orphaned: it takes part in no assertion"));
            }
        }

        for warning in &warnings {
            warn!(warning = %warning, "store_validation_warning");
        }
        warnings
    }

    /// Copies every record into a [`StatementCollection`], e.g. for printing.
    pub fn export(&self) -> Result<StatementCollection> {
        let mut collection = StatementCollection::new();
        for reference in self.entities() {
            collection.add(reference.entity().clone())?;
        }
        for relation in self.relations() {
            collection.add(relation.clone())?;
        }
        for assertion in self.assertions() {
            collection.add(assertion.clone())?;
        }
        Ok(collection)
    }
}
