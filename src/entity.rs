use derive_more::{Deref, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;
use uuid::Uuid;

pub use rendered_entity_derive::EntityType;

/// An entity type that can be referenced from listing rows and rendered in one of its view
/// modes.
///
/// Usually implemented with `#[derive(EntityType)]`:
///
/// ```
/// use rendered_entity::EntityType;
///
/// #[derive(EntityType)]
/// #[entity(view_mode(name = "teaser"), view_mode(name = "full", label = "Full content"))]
/// struct BlogPost;
///
/// assert_eq!(BlogPost::entity_type_id(), "blog_post");
/// assert_eq!(BlogPost::view_modes(), &[("teaser", "Teaser"), ("full", "Full content")]);
/// ```
pub trait EntityType {
    fn entity_type_id() -> &'static str;
    /// `(id, label)` of every view mode this entity type advertises besides `default`
    fn view_modes() -> &'static [(&'static str, &'static str)];
}

#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    Display,
    From,
    FromStr,
    Into,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
)]
#[serde(transparent)]
pub struct EntityTypeId(String);

impl From<&str> for EntityTypeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl EntityTypeId {
    pub fn of<E: EntityType>() -> Self {
        E::entity_type_id().into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of an entity, unique within its entity type
#[derive(
    Clone,
    Debug,
    Default,
    Deref,
    Display,
    From,
    FromStr,
    Into,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
)]
#[serde(transparent)]
pub struct EntityId(String);

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A reference from a result row to an entity, together with the language the row was
/// produced in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub entity_type: EntityTypeId,
    pub id: EntityId,
    /// language of the row, filled in by the listing engine when the query selected it
    pub langcode: Option<LanguageIdentifier>,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<EntityTypeId>, id: impl Into<EntityId>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            langcode: None,
        }
    }

    pub fn with_langcode(mut self, langcode: LanguageIdentifier) -> Self {
        self.langcode = Some(langcode);
        self
    }
}

/// An entity that may exist in several languages.
pub trait Translatable: Sized {
    /// language of this translation
    fn langcode(&self) -> &LanguageIdentifier;

    /// the translation into `langcode`, if the entity has one
    fn translation(&self, langcode: &LanguageIdentifier) -> Option<Self>;
}
