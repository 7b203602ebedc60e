use maud::{html, Markup};
use uuid::Uuid;

use crate::{input::SelectInput, view_mode::ViewMode};

/// Renders an entity using one of its view modes.
pub trait EntityViewRenderer<E> {
    type Error;

    fn view(&self, entity: &E, view_mode: &ViewMode) -> Result<Markup, Self::Error>;
}

/// Output of a column that has nothing to show for a row.
pub fn empty() -> Markup {
    html!()
}

pub fn is_empty(markup: &Markup) -> bool {
    markup.0.is_empty()
}

#[non_exhaustive]
pub struct FormRenderContext<'a> {
    /// unique id of the HTML form element
    pub form_id: &'a str,
}

pub fn input_select(input: &SelectInput, ctx: &FormRenderContext) -> Markup {
    let id = &format!("{}_{}", ctx.form_id, input.name);
    html! {
        div class="cms-prop-container" {
            label class="cms-prop-label" for=(id) {(input.title)}
            select name=(input.name) id=(id) class="cms-select-input" {
                @for o in &input.options {
                    option value=(o.value.as_str()) selected[o.value == input.default_value] {
                        (o.label)
                    }
                }
            }
            @if let Some(description) = &input.description {
                p class="cms-prop-description" {(description)}
            }
        }
    }
}

/// Wraps form fields in a `<form>` element with a fresh id.
pub fn options_form(fields: impl FnOnce(&FormRenderContext) -> Markup) -> Markup {
    let form_id = &Uuid::new_v4().to_string();
    let ctx = FormRenderContext { form_id };
    html! {
        form id=(form_id) class="cms-options-form" method="post" {
            (fields(&ctx))
        }
    }
}
