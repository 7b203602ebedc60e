use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    convert::Infallible,
};

use maud::{html, Markup};
use pretty_assertions::assert_eq;
use rendered_entity::{
    access::{AllowAll, Operation},
    context::Context,
    entity::{EntityId, EntityTypeId},
    i18n::language_loader,
    input::FormField,
    language::LanguageManager,
    options::{ColumnDefinition, ColumnOptions, OptionsError},
    query::{Query, SelectQuery},
    render::is_empty,
    row::ResultRow,
    translation::{RenderingLanguage, TranslationRenderer},
    view_mode::EntityTypeRegistry,
    AccessChecker, EntityRef, EntityViewRenderer, ListColumn, RenderedEntity, Translatable,
    TranslationResolver, ViewMode,
};
use serde_json::json;
use unic_langid::{langid, LanguageIdentifier};

#[derive(Clone, Debug, PartialEq)]
struct Node {
    id: u64,
    title: &'static str,
    published: bool,
}

#[derive(Default)]
struct RecordingResolver {
    nodes: BTreeMap<EntityId, Node>,
    resolved: RefCell<Vec<EntityRef>>,
    contributions: RefCell<Vec<(usize, Option<String>)>>,
}

impl TranslationResolver for RecordingResolver {
    type Entity = Node;

    fn resolve(&self, reference: &EntityRef, _row: &ResultRow) -> Option<Node> {
        self.resolved.borrow_mut().push(reference.clone());
        self.nodes.get(&reference.id).cloned()
    }

    fn contribute_query(&self, query: &mut dyn Query, relationship: Option<&str>) {
        let addr = &*query as *const _ as *const () as usize;
        self.contributions
            .borrow_mut()
            .push((addr, relationship.map(str::to_string)));
        let table = relationship.unwrap_or(query.base_table()).to_string();
        query.add_field(&table, "langcode");
    }
}

struct Viewer {
    administrator: bool,
}

struct PublishedOnly;

impl AccessChecker<Node> for PublishedOnly {
    type Viewer = Viewer;

    fn access(&self, node: &Node, operation: Operation, viewer: &Viewer) -> bool {
        operation == Operation::View && (node.published || viewer.administrator)
    }
}

#[derive(Debug, PartialEq)]
struct MissingTemplate(ViewMode);

#[derive(Default)]
struct RecordingRenderer {
    calls: RefCell<Vec<(Node, ViewMode)>>,
}

impl EntityViewRenderer<Node> for RecordingRenderer {
    type Error = MissingTemplate;

    fn view(&self, node: &Node, view_mode: &ViewMode) -> Result<Markup, MissingTemplate> {
        self.calls
            .borrow_mut()
            .push((node.clone(), view_mode.clone()));
        if view_mode.as_str() == "removed" {
            return Err(MissingTemplate(view_mode.clone()));
        }
        Ok(html! {
            div class=(format!("node node--{view_mode}")) { (node.title) }
        })
    }
}

type TestColumn = RenderedEntity<
    Context<RecordingResolver, PublishedOnly, RecordingRenderer, EntityTypeRegistry, Viewer>,
>;

fn column_with(
    view_mode: &str,
    languages: LanguageManager,
    definition: ColumnDefinition,
) -> TestColumn {
    let nodes = [
        Node { id: 1, title: "Hello", published: true },
        Node { id: 2, title: "Draft", published: false },
    ]
    .into_iter()
    .map(|n| (EntityId::from(n.id), n))
    .collect();
    RenderedEntity::new(
        definition,
        ColumnOptions::new(view_mode),
        Context {
            resolver: RecordingResolver {
                nodes,
                ..Default::default()
            },
            access: PublishedOnly,
            renderer: RecordingRenderer::default(),
            view_modes: EntityTypeRegistry::new()
                .view_modes("node", [("teaser", "Teaser"), ("full", "Full content")]),
            languages,
            viewer: Viewer {
                administrator: false,
            },
        },
    )
}

fn column(view_mode: &str) -> TestColumn {
    column_with(
        view_mode,
        LanguageManager::new(langid!("en")),
        ColumnDefinition::new("node_rendered", "node"),
    )
}

fn row(id: u64) -> ResultRow {
    ResultRow::new(0).with_entity(EntityRef::new("node", id).with_langcode(langid!("en")))
}

#[test]
fn renders_viewable_entity_in_configured_view_mode() {
    let column = column("teaser");
    let out = column.render(&row(1)).unwrap();

    assert_eq!(out.into_string(), r#"<div class="node node--teaser">Hello</div>"#);
    let calls = column.context().renderer.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.id, 1);
    assert_eq!(calls[0].1, ViewMode::from("teaser"));
}

#[test]
fn deleted_entity_renders_empty() {
    let column = column("teaser");
    let out = column.render(&row(3)).unwrap();

    assert!(is_empty(&out));
    assert_eq!(column.context().resolver.resolved.borrow().len(), 1);
    assert!(column.context().renderer.calls.borrow().is_empty());
}

#[test]
fn row_without_reference_renders_empty() {
    let column = column("teaser");
    let out = column.render(&ResultRow::new(4)).unwrap();

    assert!(is_empty(&out));
    assert!(column.context().resolver.resolved.borrow().is_empty());
}

#[test]
fn denied_entity_renders_empty_but_is_resolved() {
    let column = column("teaser");
    let out = column.render(&row(2)).unwrap();

    assert!(is_empty(&out));
    assert_eq!(
        *column.context().resolver.resolved.borrow(),
        [EntityRef::new("node", 2u64).with_langcode(langid!("en"))]
    );
    assert!(column.context().renderer.calls.borrow().is_empty());
}

#[test]
fn administrator_sees_unpublished_entity() {
    let column = column("full");
    let nodes = column.context().resolver.nodes.clone();
    let column = RenderedEntity::new(
        column.definition().clone(),
        column.options().clone(),
        Context {
            resolver: RecordingResolver {
                nodes,
                ..Default::default()
            },
            access: PublishedOnly,
            renderer: RecordingRenderer::default(),
            view_modes: EntityTypeRegistry::new(),
            languages: LanguageManager::new(langid!("en")),
            viewer: Viewer {
                administrator: true,
            },
        },
    );

    let out = column.render(&row(2)).unwrap();
    assert_eq!(out.into_string(), r#"<div class="node node--full">Draft</div>"#);
}

#[test]
fn entity_of_another_type_renders_empty_without_loading() {
    let column = column("teaser");
    let row = ResultRow::new(0).with_entity(EntityRef::new("user", 1u64));

    let out = column.render(&row).unwrap();
    assert!(is_empty(&out));
    assert!(column.context().resolver.resolved.borrow().is_empty());
    assert!(column.context().renderer.calls.borrow().is_empty());
}

#[test]
fn renderer_errors_propagate_unchanged() {
    let column = column("removed");
    assert_eq!(
        column.render(&row(1)).unwrap_err(),
        MissingTemplate(ViewMode::from("removed"))
    );
}

#[test]
fn relationship_entity_is_rendered() {
    let column = column_with(
        "teaser",
        LanguageManager::new(langid!("en")),
        ColumnDefinition::new("parent_rendered", "node").relationship("parent"),
    );
    let row = ResultRow::new(0)
        .with_entity(EntityRef::new("node", 2u64))
        .with_relationship_entity("parent", EntityRef::new("node", 1u64));

    let out = column.render(&row).unwrap();
    assert_eq!(out.into_string(), r#"<div class="node node--teaser">Hello</div>"#);
}

#[test]
fn monolingual_query_is_untouched() {
    let column = column("teaser");
    let mut q = SelectQuery::new("node_field_data");
    let before = q.clone();

    column.query(&mut q);
    column.contribute_to_query(&mut q, Some("parent"), false);

    assert_eq!(q, before);
    assert!(column.context().resolver.contributions.borrow().is_empty());
}

#[test]
fn multilingual_query_is_delegated_once() {
    let column = column_with(
        "teaser",
        LanguageManager::new(langid!("en")).language(langid!("de")),
        ColumnDefinition::new("parent_rendered", "node").relationship("parent"),
    );
    let mut q = SelectQuery::new("node_field_data");
    let addr = &q as *const SelectQuery as usize;

    column.query(&mut q);

    assert_eq!(
        *column.context().resolver.contributions.borrow(),
        [(addr, Some("parent".to_string()))]
    );
    assert_eq!(q.fields().len(), 1);
    assert_eq!(q.fields()[0].alias, "parent_langcode");
}

#[test]
fn explicit_multilingual_flag_passes_query_and_relationship() {
    let column = column("teaser");
    let mut q = SelectQuery::new("node_field_data");
    let addr = &q as *const SelectQuery as usize;

    column.contribute_to_query(&mut q, None, true);

    assert_eq!(
        *column.context().resolver.contributions.borrow(),
        [(addr, None)]
    );
}

#[test]
fn never_used_for_grouping() {
    assert!(!column("teaser").uses_group_by());
    assert!(!column("default").uses_group_by());
}

#[test]
fn declares_view_mode_option() {
    let options = column("teaser").define_options();
    assert_eq!(options.len(), 1);
    assert_eq!(options["view_mode"].default, json!("default"));
}

#[test]
fn options_form_offers_registered_view_modes() {
    let i18n = language_loader(None).unwrap();
    let column = column("teaser");
    let form = column.build_options_form(&i18n);

    let Some(FormField::Select(select)) = form.field("view_mode") else {
        panic!("view_mode select missing: {form:?}");
    };
    assert_eq!(select.title, "View mode");
    assert_eq!(select.default_value, ViewMode::from("teaser"));
    let values = select.values().map(ViewMode::as_str).collect::<BTreeSet<_>>();
    assert_eq!(values, BTreeSet::from(["default", "full", "teaser"]));

    let html = form.render().into_string();
    assert!(html.contains(r#"<option value="teaser" selected>Teaser</option>"#));
    assert!(html.contains(r#"<option value="full">Full content</option>"#));
}

#[test]
fn options_form_defaults_to_default_view_mode() {
    let i18n = language_loader(Some("de-DE")).unwrap();
    let configured = column("teaser");
    let column = RenderedEntity::new(
        ColumnDefinition::new("node_rendered", "node"),
        ColumnOptions::from_json("{}").unwrap(),
        configured.context(),
    );
    let form = column.build_options_form(&i18n);

    let Some(FormField::Select(select)) = form.field("view_mode") else {
        panic!("view_mode select missing: {form:?}");
    };
    assert_eq!(select.title, "Anzeigemodus");
    assert!(select.default_value.is_default());
}

#[test]
fn submitting_options_form_validates_view_mode() {
    let mut column = column("teaser");

    column.submit_options_form(b"view_mode=full").unwrap();
    assert_eq!(column.options().view_mode, ViewMode::from("full"));

    let err = column.submit_options_form(b"view_mode=gallery").unwrap_err();
    assert!(matches!(
        err,
        OptionsError::UnknownViewMode { ref view_mode, .. } if view_mode.as_str() == "gallery"
    ));
    assert_eq!(column.options().view_mode, ViewMode::from("full"));
}

#[test]
fn entity_type_comes_from_definition() {
    let column = column("teaser");
    assert_eq!(column.entity_type_id().as_str(), "node");
}

#[derive(Clone, Debug)]
struct Article {
    langcode: LanguageIdentifier,
    title: &'static str,
    translations: Vec<(LanguageIdentifier, &'static str)>,
}

impl Translatable for Article {
    fn langcode(&self) -> &LanguageIdentifier {
        &self.langcode
    }

    fn translation(&self, langcode: &LanguageIdentifier) -> Option<Self> {
        let (langcode, title) = self.translations.iter().find(|(l, _)| l == langcode)?;
        Some(Article {
            langcode: langcode.clone(),
            title: *title,
            translations: Vec::new(),
        })
    }
}

struct Headline;

impl EntityViewRenderer<Article> for Headline {
    type Error = Infallible;

    fn view(&self, article: &Article, _view_mode: &ViewMode) -> Result<Markup, Infallible> {
        Ok(html! { h2 lang=(article.langcode.to_string()) { (article.title) } })
    }
}

#[test]
fn row_language_selected_by_query_picks_translation() {
    let storage = BTreeMap::from([(
        (EntityTypeId::from("article"), EntityId::from(1u64)),
        Article {
            langcode: langid!("en"),
            title: "Hello",
            translations: vec![(langid!("de"), "Hallo")],
        },
    )]);
    let column = RenderedEntity::new(
        ColumnDefinition::new("article_rendered", "article"),
        ColumnOptions::new("default"),
        Context {
            resolver: TranslationRenderer::new(storage, RenderingLanguage::Row),
            access: AllowAll,
            renderer: Headline,
            view_modes: EntityTypeRegistry::new(),
            languages: LanguageManager::new(langid!("en")).language(langid!("de")),
            viewer: (),
        },
    );
    let mut q = SelectQuery::new("article_field_data");
    column.query(&mut q);
    assert_eq!(q.fields()[0].alias, "article_field_data_langcode");

    // only the selected field carries the language, the reference does not
    let row = ResultRow::new(0)
        .with_entity(EntityRef::new("article", 1u64))
        .with_value("article_field_data_langcode", "de");
    assert_eq!(
        column.render(&row).unwrap().into_string(),
        r#"<h2 lang="de">Hallo</h2>"#
    );

    let row = ResultRow::new(1).with_entity(EntityRef::new("article", 1u64));
    assert_eq!(
        column.render(&row).unwrap().into_string(),
        r#"<h2 lang="en">Hello</h2>"#
    );
}
