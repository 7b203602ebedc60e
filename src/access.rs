use derive_more::Display;

/// Operations an [`AccessChecker`] can be asked about
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Operation {
    #[display("view")]
    View,
}

/// Decides whether a viewer may perform an operation on an entity.
pub trait AccessChecker<E> {
    type Viewer;

    fn access(&self, entity: &E, operation: Operation, viewer: &Self::Viewer) -> bool;

    fn can_view(&self, entity: &E, viewer: &Self::Viewer) -> bool {
        self.access(entity, Operation::View, viewer)
    }
}

/// Grants every operation to everyone.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl<E> AccessChecker<E> for AllowAll {
    type Viewer = ();

    fn access(&self, _entity: &E, _operation: Operation, _viewer: &()) -> bool {
        true
    }
}
