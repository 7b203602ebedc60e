//! A listing column that renders the entity a result row references in a configurable view
//! mode. The entity is shown in the right translation, and only to viewers allowed to see it.
//!
//! The column is wired to its collaborators through a [`context::ContextTrait`]: a
//! [`TranslationResolver`] that loads the entity in the right language, an
//! [`AccessChecker`], an [`EntityViewRenderer`] and a [`ViewModeRegistry`]. Default
//! implementations are provided for the resolver ([`translation::TranslationRenderer`]) and
//! the registry ([`view_mode::EntityTypeRegistry`]).
//!
//! Example
//!
//! ```
//! use std::{collections::BTreeMap, convert::Infallible};
//!
//! use maud::{html, Markup};
//! use rendered_entity::{
//!     access::AllowAll, context::Context, entity::{EntityId, EntityTypeId},
//!     language::LanguageManager,
//!     options::{ColumnDefinition, ColumnOptions}, row::ResultRow,
//!     translation::{RenderingLanguage, TranslationRenderer}, view_mode::EntityTypeRegistry,
//!     EntityRef, EntityType, EntityViewRenderer, ListColumn, RenderedEntity, Translatable,
//!     ViewMode,
//! };
//! use unic_langid::{langid, LanguageIdentifier};
//!
//! #[derive(Clone, Debug, EntityType)]
//! #[entity(view_mode(name = "teaser"))]
//! struct Article {
//!     langcode: LanguageIdentifier,
//!     title: String,
//! }
//!
//! impl Translatable for Article {
//!     fn langcode(&self) -> &LanguageIdentifier {
//!         &self.langcode
//!     }
//!     fn translation(&self, _langcode: &LanguageIdentifier) -> Option<Self> {
//!         None
//!     }
//! }
//!
//! struct Templates;
//!
//! impl EntityViewRenderer<Article> for Templates {
//!     type Error = Infallible;
//!
//!     fn view(&self, article: &Article, view_mode: &ViewMode) -> Result<Markup, Infallible> {
//!         Ok(html! { article class=(view_mode.as_str()) { h2 { (article.title) } } })
//!     }
//! }
//!
//! let storage = BTreeMap::from([(
//!     (EntityTypeId::of::<Article>(), EntityId::from(1u64)),
//!     Article { langcode: langid!("en"), title: "Hello".to_string() },
//! )]);
//! let column = RenderedEntity::new(
//!     ColumnDefinition::new("article", "article"),
//!     ColumnOptions::new("teaser"),
//!     Context {
//!         resolver: TranslationRenderer::new(storage, RenderingLanguage::Row),
//!         access: AllowAll,
//!         renderer: Templates,
//!         view_modes: EntityTypeRegistry::new().entity::<Article>(),
//!         languages: LanguageManager::new(langid!("en")),
//!         viewer: (),
//!     },
//! );
//!
//! let row = ResultRow::new(0).with_entity(EntityRef::new("article", 1u64));
//! assert_eq!(
//!     column.render(&row).unwrap().into_string(),
//!     r#"<article class="teaser"><h2>Hello</h2></article>"#
//! );
//! ```

extern crate self as rendered_entity;

pub use access::AccessChecker;
pub use column::{ListColumn, RenderedEntity};
pub use entity::{EntityRef, EntityType, Translatable};
pub use render::EntityViewRenderer;
pub use translation::TranslationResolver;
pub use view_mode::{ViewMode, ViewModeRegistry};

pub mod access;
pub mod column;
pub mod context;
pub mod entity;
pub mod i18n;
pub mod input;
pub mod language;
pub mod options;
pub mod query;
pub mod render;
pub mod row;
pub mod translation;
pub mod view_mode;
