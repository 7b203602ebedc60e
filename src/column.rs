use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed_fl::fl;
use maud::Markup;
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    access::AccessChecker,
    context::{ContextTrait, RenderError},
    entity::EntityTypeId,
    input::{FormField, FormSpec, SelectInput, SelectOption},
    options::{ColumnDefinition, ColumnOptions, OptionDefinition, OptionSchema, OptionsError},
    query::Query,
    render::{self, EntityViewRenderer},
    row::ResultRow,
    translation::TranslationResolver,
    view_mode::{ViewModeRegistry, DEFAULT_VIEW_MODE},
};

/// A column of a listing, driven by the listing engine through its setup, query and render
/// phases.
pub trait ListColumn {
    type Error;

    fn define_options(&self) -> OptionSchema;
    fn build_options_form(&self, i18n: &FluentLanguageLoader) -> FormSpec;
    fn submit_options_form(&mut self, body: &[u8]) -> Result<(), OptionsError>;
    /// add what the column needs to the listing query
    fn query(&self, query: &mut dyn Query);
    fn render(&self, row: &ResultRow) -> Result<Markup, Self::Error>;

    /// whether the column may be used as a grouping key
    fn uses_group_by(&self) -> bool {
        true
    }
}

/// Renders the entity a row references in a configurable view mode.
///
/// Rows whose entity is gone, or which the viewer may not see, render as empty markup.
#[derive(Clone, Debug)]
pub struct RenderedEntity<C> {
    definition: ColumnDefinition,
    options: ColumnOptions,
    ctx: C,
}

impl<C: ContextTrait> RenderedEntity<C> {
    pub fn new(definition: ColumnDefinition, options: ColumnOptions, ctx: C) -> Self {
        Self {
            definition,
            options,
            ctx,
        }
    }

    pub fn entity_type_id(&self) -> &EntityTypeId {
        &self.definition.entity_type
    }

    pub fn definition(&self) -> &ColumnDefinition {
        &self.definition
    }

    pub fn options(&self) -> &ColumnOptions {
        &self.options
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Hand query construction to the translation resolver, and only when the site is
    /// multilingual. No field of its own is added: the entity is loaded by the resolver.
    pub fn contribute_to_query(
        &self,
        query: &mut dyn Query,
        relationship: Option<&str>,
        is_multilingual: bool,
    ) {
        if !is_multilingual {
            return;
        }
        self.ctx.resolver().contribute_query(query, relationship);
    }
}

impl<C: ContextTrait> ListColumn for RenderedEntity<C> {
    type Error = RenderError<C>;

    fn define_options(&self) -> OptionSchema {
        OptionSchema::from([(
            "view_mode",
            OptionDefinition::new(Value::from(DEFAULT_VIEW_MODE)),
        )])
    }

    fn build_options_form(&self, i18n: &FluentLanguageLoader) -> FormSpec {
        let options = self
            .ctx
            .view_modes()
            .view_mode_options(self.entity_type_id())
            .into_iter()
            .map(|(value, label)| SelectOption { value, label })
            .collect();
        FormSpec {
            fields: vec![FormField::Select(SelectInput {
                name: "view_mode",
                title: fl!(i18n, "view-mode-title"),
                description: Some(fl!(i18n, "view-mode-description")),
                options,
                default_value: self.options.view_mode.clone(),
            })],
        }
    }

    fn submit_options_form(&mut self, body: &[u8]) -> Result<(), OptionsError> {
        let options = ColumnOptions::from_form(body)?;
        if !self
            .ctx
            .view_modes()
            .has_view_mode(self.entity_type_id(), &options.view_mode)
        {
            return Err(OptionsError::UnknownViewMode {
                entity_type: self.entity_type_id().clone(),
                view_mode: options.view_mode,
            });
        }
        debug!(
            "Column {} now renders {} entities as {}",
            self.definition.id, self.definition.entity_type, options.view_mode
        );
        self.options = options;
        Ok(())
    }

    fn query(&self, query: &mut dyn Query) {
        self.contribute_to_query(
            query,
            self.definition.relationship.as_deref(),
            self.ctx.languages().is_multilingual(),
        );
    }

    fn render(&self, row: &ResultRow) -> Result<Markup, Self::Error> {
        let Some(reference) = row.entity_ref(self.definition.relationship.as_deref()) else {
            trace!("Row {} references no entity", row.index);
            return Ok(render::empty());
        };
        if reference.entity_type != *self.entity_type_id() {
            debug!(
                "Row {}: {} {} is not a {} entity",
                row.index,
                reference.entity_type,
                reference.id,
                self.entity_type_id()
            );
            return Ok(render::empty());
        }
        let Some(entity) = self.ctx.resolver().resolve(reference, row) else {
            debug!(
                "Row {}: {} {} could not be loaded",
                row.index, reference.entity_type, reference.id
            );
            return Ok(render::empty());
        };
        if !self.ctx.access().can_view(&entity, self.ctx.viewer()) {
            debug!(
                "Row {}: view access to {} {} denied",
                row.index, reference.entity_type, reference.id
            );
            return Ok(render::empty());
        }
        self.ctx.renderer().view(&entity, &self.options.view_mode)
    }

    fn uses_group_by(&self) -> bool {
        false
    }
}
