use std::collections::BTreeMap;

use serde_json::Value;

use crate::entity::EntityRef;

/// One row of listing output.
///
/// Produced by the listing engine while executing its query; columns only ever read it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultRow {
    /// position of the row in the result set
    pub index: usize,
    /// the entity of the listing's base table
    pub entity: Option<EntityRef>,
    /// entities reached through relationships, keyed by relationship id
    pub relationship_entities: BTreeMap<String, EntityRef>,
    /// raw field values keyed by their query alias
    pub values: BTreeMap<String, Value>,
}

impl ResultRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: EntityRef) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_relationship_entity(
        mut self,
        relationship: impl Into<String>,
        entity: EntityRef,
    ) -> Self {
        self.relationship_entities.insert(relationship.into(), entity);
        self
    }

    pub fn with_value(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(alias.into(), value.into());
        self
    }

    /// The entity reference for `relationship`, or the base entity when there is none.
    pub fn entity_ref(&self, relationship: Option<&str>) -> Option<&EntityRef> {
        match relationship {
            Some(r) => self.relationship_entities.get(r),
            None => self.entity.as_ref(),
        }
    }

    /// Where `reference` sits in this row: `Some(None)` for the base entity, `Some(Some(r))`
    /// for the entity of relationship `r`. A reference borrowed from this row is matched by
    /// address, so a base entity equal to a related one is not mistaken for it.
    pub fn relationship_of(&self, reference: &EntityRef) -> Option<Option<&str>> {
        let entries = || {
            self.entity
                .iter()
                .map(|e| (None, e))
                .chain(
                    self.relationship_entities
                        .iter()
                        .map(|(r, e)| (Some(r.as_str()), e)),
                )
        };
        entries()
            .find(|(_, e)| std::ptr::eq(*e, reference))
            .or_else(|| entries().find(|(_, e)| *e == reference))
            .map(|(r, _)| r)
    }

    pub fn value(&self, alias: &str) -> Option<&Value> {
        self.values.get(alias)
    }
}
