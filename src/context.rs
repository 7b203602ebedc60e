use crate::{
    access::AccessChecker,
    language::LanguageManager,
    render::EntityViewRenderer,
    translation::TranslationResolver,
    view_mode::ViewModeRegistry,
};

/// Collaborators a rendered entity column is wired to, available for the lifetime of a
/// listing execution.
pub trait ContextTrait {
    type Entity;
    type Viewer;
    type Resolver: TranslationResolver<Entity = Self::Entity>;
    type Access: AccessChecker<Self::Entity, Viewer = Self::Viewer>;
    type Renderer: EntityViewRenderer<Self::Entity>;
    type ViewModes: ViewModeRegistry;

    fn resolver(&self) -> &Self::Resolver;
    fn access(&self) -> &Self::Access;
    fn renderer(&self) -> &Self::Renderer;
    fn view_modes(&self) -> &Self::ViewModes;
    fn languages(&self) -> &LanguageManager;
    /// the user the listing is rendered for
    fn viewer(&self) -> &Self::Viewer;
}

/// Error returned by the entity view renderer of a context
pub type RenderError<C> =
    <<C as ContextTrait>::Renderer as EntityViewRenderer<<C as ContextTrait>::Entity>>::Error;

#[derive(Clone, Debug)]
pub struct Context<T, A, R, M, V> {
    pub resolver: T,
    pub access: A,
    pub renderer: R,
    pub view_modes: M,
    pub languages: LanguageManager,
    pub viewer: V,
}

impl<T, A, R, M, V> ContextTrait for Context<T, A, R, M, V>
where
    T: TranslationResolver,
    A: AccessChecker<T::Entity, Viewer = V>,
    R: EntityViewRenderer<T::Entity>,
    M: ViewModeRegistry,
{
    type Entity = T::Entity;
    type Viewer = V;
    type Resolver = T;
    type Access = A;
    type Renderer = R;
    type ViewModes = M;

    fn resolver(&self) -> &T {
        &self.resolver
    }
    fn access(&self) -> &A {
        &self.access
    }
    fn renderer(&self) -> &R {
        &self.renderer
    }
    fn view_modes(&self) -> &M {
        &self.view_modes
    }
    fn languages(&self) -> &LanguageManager {
        &self.languages
    }
    fn viewer(&self) -> &V {
        &self.viewer
    }
}

impl<C: ContextTrait> ContextTrait for &C {
    type Entity = C::Entity;
    type Viewer = C::Viewer;
    type Resolver = C::Resolver;
    type Access = C::Access;
    type Renderer = C::Renderer;
    type ViewModes = C::ViewModes;

    fn resolver(&self) -> &C::Resolver {
        (**self).resolver()
    }
    fn access(&self) -> &C::Access {
        (**self).access()
    }
    fn renderer(&self) -> &C::Renderer {
        (**self).renderer()
    }
    fn view_modes(&self) -> &C::ViewModes {
        (**self).view_modes()
    }
    fn languages(&self) -> &LanguageManager {
        (**self).languages()
    }
    fn viewer(&self) -> &C::Viewer {
        (**self).viewer()
    }
}
