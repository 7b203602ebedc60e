use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use derive_more::{Deref, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::entity::{EntityType, EntityTypeId};

/// Name of the view mode every entity type supports.
pub const DEFAULT_VIEW_MODE: &str = "default";

/// Name of a display template of an entity type, e.g. `teaser`
#[derive(
    Clone, Debug, Deref, Display, From, FromStr, Into, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(transparent)]
pub struct ViewMode(String);

impl ViewMode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_VIEW_MODE
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        Self(DEFAULT_VIEW_MODE.to_string())
    }
}

impl From<&str> for ViewMode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// an unset or empty stored value means `default`
impl<'de> Deserialize<'de> for ViewMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(match s {
            Some(s) if !s.is_empty() => Self(s),
            _ => Self::default(),
        })
    }
}

/// Knows which view modes each entity type advertises.
pub trait ViewModeRegistry {
    /// view mode id → human readable label
    fn view_mode_options(&self, entity_type: &EntityTypeId) -> BTreeMap<ViewMode, String>;

    fn has_view_mode(&self, entity_type: &EntityTypeId, view_mode: &ViewMode) -> bool {
        self.view_mode_options(entity_type).contains_key(view_mode)
    }
}

/// A [`ViewModeRegistry`] built from entity type declarations.
#[derive(Clone, Debug, Default)]
pub struct EntityTypeRegistry {
    view_modes: BTreeMap<EntityTypeId, BTreeMap<ViewMode, String>>,
}

impl EntityTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// register an entity type and its view modes
    pub fn entity<E: EntityType>(self) -> Self {
        self.view_modes(E::entity_type_id(), E::view_modes().iter().copied())
    }

    /// Register view modes for an entity type by id. Labels left empty are derived from the
    /// view mode name.
    pub fn view_modes<'a>(
        mut self,
        entity_type: impl Into<EntityTypeId>,
        modes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let options = self.view_modes.entry(entity_type.into()).or_default();
        for (name, label) in modes {
            let label = match label {
                "" => name.to_case(Case::Title),
                l => l.to_string(),
            };
            options.insert(name.into(), label);
        }
        self
    }
}

impl ViewModeRegistry for EntityTypeRegistry {
    fn view_mode_options(&self, entity_type: &EntityTypeId) -> BTreeMap<ViewMode, String> {
        let mut options = BTreeMap::from([(ViewMode::default(), "Default".to_string())]);
        if let Some(modes) = self.view_modes.get(entity_type) {
            options.extend(modes.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        options
    }
}
