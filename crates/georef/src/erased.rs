use crate::object::ReferenceObject;
use georef_domain::Authority;
use georef_reference::{Diagnostic, ReferenceCollection, ReferenceError, RowConverter};
use std::sync::Arc;

/// A collection whose family is chosen at run time.
pub(crate) trait FamilyCollection: Send + Sync {
    fn lookup(&self, authority: &str, code: i32) -> Result<ReferenceObject, ReferenceError>;

    fn lookup_by_name(&self, authority: &Authority, name: &str) -> Result<ReferenceObject, ReferenceError>;

    /// Every object of `authority`; skipped rows are left to the diagnostics.
    fn list(&self, authority: &Authority) -> Result<Vec<ReferenceObject>, ReferenceError>;

    fn diagnostics(&self) -> Vec<Diagnostic>;
}

impl<C> FamilyCollection for ReferenceCollection<C>
where
    C: RowConverter,
    Arc<C::Output>: Into<ReferenceObject>,
{
    fn lookup(&self, authority: &str, code: i32) -> Result<ReferenceObject, ReferenceError> {
        Self::lookup(self, authority, code).map(Into::into)
    }

    fn lookup_by_name(&self, authority: &Authority, name: &str) -> Result<ReferenceObject, ReferenceError> {
        self.lookup_by_name_in(authority.as_str(), name).map(Into::into)
    }

    fn list(&self, authority: &Authority) -> Result<Vec<ReferenceObject>, ReferenceError> {
        self.all_in(authority.as_str())?.map(|object| object.map(Into::into)).collect()
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        Self::diagnostics(self)
    }
}
