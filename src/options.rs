use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{entity::EntityTypeId, view_mode::ViewMode};

/// Options a column declares, with their defaults
pub type OptionSchema = BTreeMap<&'static str, OptionDefinition>;

#[derive(Clone, Debug, PartialEq)]
pub struct OptionDefinition {
    pub default: Value,
}

impl OptionDefinition {
    pub fn new(default: impl Into<Value>) -> Self {
        Self {
            default: default.into(),
        }
    }
}

/// Persisted settings of a rendered entity column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnOptions {
    #[serde(default)]
    pub view_mode: ViewMode,
}

impl ColumnOptions {
    pub fn new(view_mode: impl Into<ViewMode>) -> Self {
        Self {
            view_mode: view_mode.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, OptionsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// parse an `application/x-www-form-urlencoded` options form submission
    pub fn from_form(body: &[u8]) -> Result<Self, OptionsError> {
        serde_qs::Config::new(5, false)
            .deserialize_bytes(body)
            .map_err(|e| OptionsError::ParseForm {
                serde: e,
                body: String::from_utf8_lossy(body).into_owned(),
            })
    }
}

/// Static configuration of a column, fixed when it is added to a listing
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnDefinition {
    /// unique id of the column within its listing
    pub id: String,
    pub entity_type: EntityTypeId,
    /// relationship the entity is reached through, `None` for the listing's base entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl ColumnDefinition {
    pub fn new(id: impl Into<String>, entity_type: impl Into<EntityTypeId>) -> Self {
        Self {
            id: id.into(),
            entity_type: entity_type.into(),
            relationship: None,
        }
    }

    pub fn relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to parse options form: {serde:#}: {body}")]
    ParseForm { serde: serde_qs::Error, body: String },
    #[error("View mode `{view_mode}` is not available for entity type `{entity_type}`")]
    UnknownViewMode {
        entity_type: EntityTypeId,
        view_mode: ViewMode,
    },
    #[error("Failed to (de)serialize options: {0:#}")]
    Json(
        #[from]
        #[source]
        serde_json::Error,
    ),
}
