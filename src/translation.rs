use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
};

use tracing::trace;
use unic_langid::LanguageIdentifier;

use crate::{
    entity::{EntityId, EntityRef, EntityTypeId, Translatable},
    language::LanguageManager,
    query::Query,
    row::ResultRow,
};

/// Name of the field holding the language of an entity row
pub const LANGCODE_FIELD: &str = "langcode";

/// Resolves the language variant of an entity referenced from a result row.
pub trait TranslationResolver {
    type Entity;

    /// the entity `reference` points at, in the language the listing should show it in
    fn resolve(&self, reference: &EntityRef, row: &ResultRow) -> Option<Self::Entity>;

    /// Add whatever the listing query needs to select so that [`Self::resolve`] can pick a
    /// translation. `relationship` is the table alias the entity is joined as, if any.
    fn contribute_query(&self, query: &mut dyn Query, relationship: Option<&str>);
}

/// Loads entities by reference.
pub trait EntityStorage {
    type Entity;

    fn load(&self, reference: &EntityRef) -> Option<Self::Entity>;
}

impl<E: Clone> EntityStorage for BTreeMap<(EntityTypeId, EntityId), E> {
    type Entity = E;

    fn load(&self, reference: &EntityRef) -> Option<E> {
        self.get(&(reference.entity_type.clone(), reference.id.clone()))
            .cloned()
    }
}

impl<E: Clone> EntityStorage for HashMap<(EntityTypeId, EntityId), E> {
    type Entity = E;

    fn load(&self, reference: &EntityRef) -> Option<E> {
        self.get(&(reference.entity_type.clone(), reference.id.clone()))
            .cloned()
    }
}

/// Which language entities are rendered in
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderingLanguage {
    /// the language of the result row
    #[default]
    Row,
    /// the language the entity was originally created in
    Default,
    /// the content language of the current request
    Content(LanguageIdentifier),
}

impl RenderingLanguage {
    /// Render in the configured language that best matches the request's `Accept-Language`
    /// header.
    pub fn content(languages: &LanguageManager, accept_language: &str) -> Self {
        Self::Content(languages.negotiate(accept_language))
    }
}

/// [`TranslationResolver`] that loads entities from an [`EntityStorage`] and picks a
/// translation according to a [`RenderingLanguage`].
///
/// With [`RenderingLanguage::Row`] the row language is read from the `langcode` field this
/// renderer added to the query, falling back to [`EntityRef::langcode`]. When the entity has
/// no translation into the wanted language, the translation into the bare language (`de`
/// for `de-AT`) is used, then the entity as stored.
#[derive(Clone, Debug)]
pub struct TranslationRenderer<S> {
    storage: S,
    language: RenderingLanguage,
    /// alias of the selected `langcode` field per relationship, `None` for the base table
    langcode_aliases: RefCell<BTreeMap<Option<String>, String>>,
}

impl<S> TranslationRenderer<S> {
    pub fn new(storage: S, language: RenderingLanguage) -> Self {
        Self {
            storage,
            language,
            langcode_aliases: Default::default(),
        }
    }

    fn row_langcode(&self, reference: &EntityRef, row: &ResultRow) -> Option<LanguageIdentifier> {
        let relationship = row.relationship_of(reference)?.map(str::to_string);
        let aliases = self.langcode_aliases.borrow();
        let alias = aliases.get(&relationship)?;
        row.value(alias)?.as_str()?.parse().ok()
    }

    fn wanted_langcode(
        &self,
        reference: &EntityRef,
        row: &ResultRow,
    ) -> Option<LanguageIdentifier> {
        match &self.language {
            RenderingLanguage::Row => self
                .row_langcode(reference, row)
                .or_else(|| reference.langcode.clone()),
            RenderingLanguage::Default => None,
            RenderingLanguage::Content(lang) => Some(lang.clone()),
        }
    }
}

impl<S> TranslationResolver for TranslationRenderer<S>
where
    S: EntityStorage,
    S::Entity: Translatable,
{
    type Entity = S::Entity;

    fn resolve(&self, reference: &EntityRef, row: &ResultRow) -> Option<S::Entity> {
        let entity = self.storage.load(reference)?;
        let Some(langcode) = self.wanted_langcode(reference, row) else {
            return Some(entity);
        };
        Some(translation_with_fallback(entity, &langcode))
    }

    fn contribute_query(&self, query: &mut dyn Query, relationship: Option<&str>) {
        if self.language != RenderingLanguage::Row {
            return;
        }
        let table = match relationship {
            Some(r) => r.to_string(),
            None => query.base_table().to_string(),
        };
        let alias = query.add_field(&table, LANGCODE_FIELD);
        trace!("Selecting row language of {table} as {alias}");
        self.langcode_aliases
            .borrow_mut()
            .insert(relationship.map(str::to_string), alias);
    }
}

fn translation_with_fallback<E: Translatable>(entity: E, langcode: &LanguageIdentifier) -> E {
    if entity.langcode() == langcode {
        return entity;
    }
    if let Some(t) = entity.translation(langcode) {
        return t;
    }
    if langcode.region.is_some() || langcode.script.is_some() {
        let bare = LanguageIdentifier::from_parts(langcode.language, None, None, &[]);
        if entity.langcode() == &bare {
            return entity;
        }
        if let Some(t) = entity.translation(&bare) {
            trace!("No {langcode} translation, falling back to {bare}");
            return t;
        }
    }
    trace!(
        "No {langcode} translation, using {} as stored",
        entity.langcode()
    );
    entity
}
