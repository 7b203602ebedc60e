use maud::{html, Markup};

use crate::{
    render::{self, FormRenderContext},
    view_mode::ViewMode,
};

/// Form built by a column to edit its options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSpec {
    pub fields: Vec<FormField>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormField {
    Select(SelectInput),
}

/// a single-select control
#[derive(Clone, Debug, PartialEq)]
pub struct SelectInput {
    /// name of the option the control edits
    pub name: &'static str,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<SelectOption>,
    pub default_value: ViewMode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: ViewMode,
    pub label: String,
}

impl FormSpec {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn render(&self) -> Markup {
        render::options_form(|ctx| {
            html! {
                @for f in &self.fields {
                    (f.render_input(ctx))
                }
            }
        })
    }
}

impl FormField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select(s) => s.name,
        }
    }

    pub fn render_input(&self, ctx: &FormRenderContext) -> Markup {
        match self {
            Self::Select(s) => render::input_select(s, ctx),
        }
    }
}

impl SelectInput {
    pub fn values(&self) -> impl Iterator<Item = &ViewMode> {
        self.options.iter().map(|o| &o.value)
    }
}
