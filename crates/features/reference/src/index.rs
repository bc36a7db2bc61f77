//! Lazily built, per-authority groupings of auxiliary rows.
//!
//! A [`RowIndex`] scans one resource the first time an authority is asked for and keeps
//! its rows grouped by a numeric key column. The alias table, coordinate axes and
//! projection parameter values are all served this way.

use crate::diagnostics::Diagnostics;
use crate::error::ReferenceError;
use crate::options::{AliasScope, MalformedRowPolicy};
use fxhash::{FxHashMap, FxHashSet};
use georef_dataset::{Dataset, DatasetError, Row};
use georef_domain::{Authority, Family};
use moka::sync::Cache;
use std::sync::Arc;
use tracing::debug;

/// Resource holding `tag;code;alias` rows.
pub const ALIAS_RESOURCE: &str = "Alias";
const ALIAS_COLUMNS: usize = 3;
const ALIAS_TAG_COLUMN: usize = 0;
const ALIAS_CODE_COLUMN: usize = 1;
const ALIAS_NAME_COLUMN: usize = 2;

/// The shape of an indexed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    /// Family malformed rows are reported against.
    pub family: Family,
    pub resource: &'static str,
    /// Exact column count of every row.
    pub columns: usize,
    /// Numeric column rows are grouped by.
    pub key_column: usize,
    /// Keep only rows whose column holds this tag (ASCII case-insensitive).
    pub tag: Option<(usize, &'static str)>,
    /// Numeric column giving the order of rows within a group; dataset order otherwise.
    pub order_column: Option<usize>,
}

/// The grouped rows of one authority.
#[derive(Debug, Default)]
pub struct IndexTable {
    groups: FxHashMap<i32, Vec<Row>>,
}

impl IndexTable {
    /// Rows grouped under `code`, in order; empty when there are none.
    #[must_use]
    pub fn rows(&self, code: i32) -> &[Row] {
        self.groups.get(&code).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &[Row])> {
        self.groups.iter().map(|(code, rows)| (*code, rows.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

/// A generic lazily-built index over one resource, memoised per authority.
///
/// Concurrent first requests for one authority are coalesced into a single scan.
/// A missing resource yields an empty table; a failed build is not remembered.
pub struct RowIndex {
    dataset: Arc<dyn Dataset>,
    spec: IndexSpec,
    policy: MalformedRowPolicy,
    diagnostics: Arc<Diagnostics>,
    tables: Cache<Authority, Arc<IndexTable>>,
}

impl std::fmt::Debug for RowIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowIndex")
            .field("spec", &self.spec)
            .field("policy", &self.policy)
            .field("authorities", &self.tables.entry_count())
            .finish_non_exhaustive()
    }
}

impl RowIndex {
    #[must_use]
    pub fn new(
        dataset: Arc<dyn Dataset>,
        spec: IndexSpec,
        policy: MalformedRowPolicy,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        Self { dataset, spec, policy, diagnostics, tables: Cache::builder().name(spec.resource).build() }
    }

    #[must_use]
    pub const fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    /// The table of `authority`, built on first use.
    ///
    /// # Errors
    /// Dataset failures other than a missing resource, and malformed rows under
    /// [`MalformedRowPolicy::Abort`].
    pub fn table(&self, authority: &Authority) -> Result<Arc<IndexTable>, ReferenceError> {
        self.tables.try_get_with(authority.clone(), || self.build(authority)).map_err(Arc::unwrap_or_clone)
    }

    fn build(&self, authority: &Authority) -> Result<Arc<IndexTable>, ReferenceError> {
        let rows = match self.dataset.rows(authority.as_str(), self.spec.resource) {
            Ok(rows) => rows,
            Err(DatasetError::ResourceNotFound { .. }) => {
                debug!(resource = self.spec.resource, %authority, "Index resource absent, using an empty table");
                return Ok(Arc::default());
            },
            Err(e) => return Err(e.into()),
        };

        let mut groups: FxHashMap<i32, Vec<Row>> = FxHashMap::default();
        for row in rows {
            if let Some((column, tag)) = self.spec.tag
                && !row.get(column).is_some_and(|t| t.eq_ignore_ascii_case(tag))
            {
                continue;
            }

            if let Some(key) = self.validate(authority, &row)? {
                groups.entry(key).or_default().push(row);
            }
        }

        if let Some(column) = self.spec.order_column {
            for rows in groups.values_mut() {
                rows.sort_by_key(|row| row.get(column).and_then(|o| o.parse::<i32>().ok()).unwrap_or(i32::MAX));
            }
        }

        debug!(resource = self.spec.resource, %authority, groups = groups.len(), "Built row index");
        Ok(Arc::new(IndexTable { groups }))
    }

    /// The key of a well-formed row; `None` when a malformed row was skipped.
    fn validate(&self, authority: &Authority, row: &Row) -> Result<Option<i32>, ReferenceError> {
        let problem = if row.len() == self.spec.columns {
            let key = row.get(self.spec.key_column).and_then(|k| k.parse::<i32>().ok());
            let order_ok = self
                .spec
                .order_column
                .is_none_or(|column| row.get(column).is_some_and(|o| o.parse::<i32>().is_ok()));
            match (key, order_ok) {
                (Some(key), true) => return Ok(Some(key)),
                (None, _) => format!("non-numeric key in column {}", self.spec.key_column),
                (Some(_), false) => "non-numeric order".to_owned(),
            }
        } else {
            format!("expected {} columns, found {}", self.spec.columns, row.len())
        };

        self.diagnostics.handle(
            self.policy,
            ReferenceError::MalformedRecord {
                family: self.spec.family,
                authority: authority.clone(),
                resource: self.spec.resource.into(),
                line: row.line(),
                message: problem.into(),
                context: None,
            },
        )?;
        Ok(None)
    }
}

/// Alternate names of one family's objects, read from the alias resource.
#[derive(Debug)]
pub struct AliasIndex {
    index: RowIndex,
}

impl AliasIndex {
    #[must_use]
    pub fn new(
        dataset: Arc<dyn Dataset>,
        family: Family,
        scope: AliasScope,
        policy: MalformedRowPolicy,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        let tag = match scope {
            AliasScope::PerFamily => Some((ALIAS_TAG_COLUMN, family.alias_tag())),
            AliasScope::Global => None,
        };
        let spec = IndexSpec {
            family,
            resource: ALIAS_RESOURCE,
            columns: ALIAS_COLUMNS,
            key_column: ALIAS_CODE_COLUMN,
            tag,
            order_column: None,
        };
        Self { index: RowIndex::new(dataset, spec, policy, diagnostics) }
    }

    /// The aliases recorded for `code`, in dataset order.
    ///
    /// # Errors
    /// See [`RowIndex::table`].
    pub fn aliases_for(&self, authority: &Authority, code: i32) -> Result<Vec<String>, ReferenceError> {
        let table = self.index.table(authority)?;
        Ok(table.rows(code).iter().filter_map(|row| row.get(ALIAS_NAME_COLUMN)).map(str::to_owned).collect())
    }

    /// Codes with an alias equal to `name`, ignoring ASCII case and surrounding blanks.
    ///
    /// # Errors
    /// See [`RowIndex::table`].
    pub fn codes_named(&self, authority: &Authority, name: &str) -> Result<FxHashSet<i32>, ReferenceError> {
        let wanted = name.trim();
        let table = self.index.table(authority)?;
        Ok(table
            .iter()
            .filter(|(_, rows)| {
                rows.iter().any(|row| row.get(ALIAS_NAME_COLUMN).is_some_and(|a| a.eq_ignore_ascii_case(wanted)))
            })
            .map(|(code, _)| code)
            .collect())
    }
}
