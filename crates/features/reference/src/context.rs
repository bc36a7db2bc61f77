use crate::collection::{ReferenceCollection, RowConverter};
use crate::error::ReferenceError;
use crate::index::AliasIndex;
use crate::resolution::Resolution;
use georef_dataset::Row;
use georef_domain::{Authority, Family, Identity, ReferenceKey};
use std::str::FromStr;
use std::sync::Arc;

/// Column of the code in every family resource.
pub const CODE_COLUMN: usize = 0;
/// Column of the primary name in every family resource.
pub const NAME_COLUMN: usize = 1;

/// Everything a [`RowConverter`] may touch while turning one row into an object.
///
/// Column accessors fail with [`ReferenceError::MalformedRecord`] pointing at this row.
/// [`ConvertContext::resolve`] continues the caller's resolution chain.
#[derive(Debug)]
pub struct ConvertContext<'a> {
    family: Family,
    authority: &'a Authority,
    row: &'a Row,
    aliases: &'a AliasIndex,
    resolution: &'a mut Resolution,
}

impl<'a> ConvertContext<'a> {
    pub(crate) const fn new(
        family: Family,
        authority: &'a Authority,
        row: &'a Row,
        aliases: &'a AliasIndex,
        resolution: &'a mut Resolution,
    ) -> Self {
        Self { family, authority, row, aliases, resolution }
    }

    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }

    /// Authority of the row; bare foreign keys resolve within it.
    #[must_use]
    pub const fn authority(&self) -> &Authority {
        self.authority
    }

    #[must_use]
    pub const fn row(&self) -> &Row {
        self.row
    }

    /// An error locating `message` at this row.
    #[must_use]
    pub fn malformed(&self, message: impl Into<std::borrow::Cow<'static, str>>) -> ReferenceError {
        ReferenceError::MalformedRecord {
            family: self.family,
            authority: self.authority.clone(),
            resource: self.family.resource().into(),
            line: self.row.line(),
            message: message.into(),
            context: None,
        }
    }

    /// An error locating `message` at a child row of this row, e.g. an axis.
    #[must_use]
    pub fn malformed_child(
        &self,
        resource: &'static str,
        child: &Row,
        message: impl Into<std::borrow::Cow<'static, str>>,
    ) -> ReferenceError {
        ReferenceError::MalformedRecord {
            family: self.family,
            authority: self.authority.clone(),
            resource: resource.into(),
            line: child.line(),
            message: message.into(),
            context: None,
        }
    }

    /// A mandatory, non-empty column of a child row.
    ///
    /// # Errors
    /// Malformed, located at the child row, when the column is missing or blank.
    pub fn child_text<'r>(&self, resource: &'static str, child: &'r Row, column: usize) -> Result<&'r str, ReferenceError> {
        match child.get(column) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.malformed_child(resource, child, format!("missing value in column {column}"))),
        }
    }

    pub(crate) fn expect_columns(&self, columns: usize) -> Result<(), ReferenceError> {
        if self.row.len() == columns {
            Ok(())
        } else {
            Err(self.malformed(format!("expected {columns} columns, found {}", self.row.len())))
        }
    }

    /// The key of this row.
    ///
    /// # Errors
    /// Malformed when the code column is not an integer.
    pub fn key(&self) -> Result<ReferenceKey, ReferenceError> {
        let code = self.parse::<i32>(CODE_COLUMN)?;
        Ok(ReferenceKey::new(self.authority, code))
    }

    /// A mandatory, non-empty column.
    ///
    /// # Errors
    /// Malformed when the column is missing or blank.
    pub fn text(&self, column: usize) -> Result<&'a str, ReferenceError> {
        match self.row.get(column) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.malformed(format!("missing value in column {column}"))),
        }
    }

    /// An optional column; blank reads as `None`.
    #[must_use]
    pub fn optional_text(&self, column: usize) -> Option<String> {
        self.row.get(column).filter(|v| !v.is_empty()).map(str::to_owned)
    }

    /// A mandatory column parsed as `T`.
    ///
    /// # Errors
    /// Malformed when the column is missing, blank or does not parse.
    pub fn parse<T: FromStr>(&self, column: usize) -> Result<T, ReferenceError> {
        let value = self.text(column)?;
        value.parse().map_err(|_| self.malformed(format!("invalid value '{value}' in column {column}")))
    }

    /// An optional column parsed as `T`; blank reads as `None`.
    ///
    /// # Errors
    /// Malformed when a non-blank value does not parse.
    pub fn optional_parse<T: FromStr>(&self, column: usize) -> Result<Option<T>, ReferenceError> {
        match self.row.get(column) {
            Some(value) if !value.is_empty() => self.parse(column).map(Some),
            _ => Ok(None),
        }
    }

    /// A mandatory finite number.
    ///
    /// # Errors
    /// Malformed when the column is missing, blank, unparsable, `NaN` or infinite.
    pub fn float(&self, column: usize) -> Result<f64, ReferenceError> {
        let value: f64 = self.parse(column)?;
        self.finite(column, value)
    }

    /// An optional finite number; blank reads as `None`.
    pub fn optional_float(&self, column: usize) -> Result<Option<f64>, ReferenceError> {
        self.optional_parse::<f64>(column)?.map(|value| self.finite(column, value)).transpose()
    }

    fn finite(&self, column: usize, value: f64) -> Result<f64, ReferenceError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.malformed(format!("non-finite value '{value}' in column {column}")))
        }
    }

    /// Whether the discriminator column holds one of `values` (ASCII case-insensitive).
    #[must_use]
    pub fn is_kind(&self, column: usize, values: &[&str]) -> bool {
        self.row.get(column).is_some_and(|kind| values.iter().any(|v| kind.eq_ignore_ascii_case(v)))
    }

    /// Builds the identity of this row: key, primary name, aliases and remarks.
    ///
    /// # Errors
    /// Malformed code or name, and alias index failures.
    pub fn identity(&self, remarks_column: Option<usize>) -> Result<Identity, ReferenceError> {
        let key = self.key()?;
        let name = self.text(NAME_COLUMN)?;
        let aliases = self.aliases.aliases_for(self.authority, key.code)?;
        Ok(Identity::new(key, name)
            .with_aliases(aliases)
            .with_remarks(remarks_column.and_then(|c| self.optional_text(c))))
    }

    /// Resolves the foreign key in `column` through `collection`.
    ///
    /// # Errors
    /// Malformed for an unparsable key; [`ReferenceError::UnresolvedReference`] when the
    /// target does not exist; anything the nested resolution fails with otherwise.
    pub fn resolve<C: RowConverter>(
        &mut self,
        collection: &ReferenceCollection<C>,
        column: usize,
    ) -> Result<Arc<C::Output>, ReferenceError> {
        let raw = self.text(column)?;
        self.resolve_value(collection, raw)
    }

    /// Like [`ConvertContext::resolve`], with a blank column reading as `None`.
    pub fn optional_resolve<C: RowConverter>(
        &mut self,
        collection: &ReferenceCollection<C>,
        column: usize,
    ) -> Result<Option<Arc<C::Output>>, ReferenceError> {
        let row = self.row;
        match row.get(column) {
            Some(raw) if !raw.is_empty() => self.resolve_value(collection, raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Resolves a foreign key given as text, e.g. taken from a child row.
    ///
    /// `code` resolves within this row's authority, `AUTHORITY:code` within the named one.
    pub fn resolve_value<C: RowConverter>(
        &mut self,
        collection: &ReferenceCollection<C>,
        raw: &str,
    ) -> Result<Arc<C::Output>, ReferenceError> {
        let target = ReferenceKey::parse(raw, self.authority)
            .ok_or_else(|| self.malformed(format!("invalid {} reference '{raw}'", C::FAMILY)))?;

        match collection.resolve_in(&target, self.resolution) {
            Err(err) if err.is_not_found() => Err(ReferenceError::UnresolvedReference {
                origin: self.key()?,
                origin_family: self.family,
                target,
                target_family: C::FAMILY,
            }),
            other => other,
        }
    }
}
