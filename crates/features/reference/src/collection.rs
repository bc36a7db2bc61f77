//! The orchestrator: one singleton cache per family, fed by lazily scanned rows.

use crate::context::{CODE_COLUMN, ConvertContext, NAME_COLUMN};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ReferenceError;
use crate::index::AliasIndex;
use crate::options::CollectionOptions;
use crate::resolution::Resolution;
use georef_dataset::{Dataset, Row, Rows};
use georef_domain::{Authority, Family, IdentifiedObject, ReferenceKey};
use moka::sync::Cache;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

/// Turns one raw row of a family resource into an object of one concrete type.
///
/// Implementations hold `Arc`s to the sibling collections their rows reference and
/// resolve foreign keys through [`ConvertContext::resolve`].
pub trait RowConverter: Send + Sync + 'static {
    type Output: IdentifiedObject + fmt::Debug + Send + Sync + 'static;

    const FAMILY: Family;
    /// Exact column count of a well-formed row.
    const COLUMNS: usize;

    /// Converts a row whose column count is already checked.
    ///
    /// Returns `Ok(None)` when the discriminator names another subtype.
    ///
    /// # Errors
    /// [`ReferenceError::MalformedRecord`] for unparsable mandatory values, and whatever
    /// resolving a foreign key fails with.
    fn convert(&self, row: &Row, ctx: &mut ConvertContext<'_>) -> Result<Option<Self::Output>, ReferenceError>;
}

/// Outcome of a cache miss that did not produce an object.
#[derive(Debug, Clone)]
enum Miss {
    /// No row converted for this family.
    Absent,
    Failed(ReferenceError),
}

/// A lazily populated, thread-safe registry of one family's objects.
///
/// Every object is built at most once per key and shared as an `Arc`: two lookups of
/// one key, or two objects referencing it, observe the same instance. Racing misses on
/// one key run a single construction; failures are never cached.
///
/// # Cycles
/// A reference cycle is reported as [`ReferenceError::CircularReference`] when one call
/// chain walks all the way round it. Converters must not wire a cycle that two threads
/// can enter from different keys at once: each thread holds its key's in-flight
/// construction while waiting on the other's, and both block. The bundled converters
/// only reference families lower in the dependency order, so they cannot form one.
///
/// ```rust
/// use georef_dataset::MemoryDataset;
/// use georef_reference::{CollectionOptions, ReferenceCollection, converters::AreaOfUseConverter};
/// use std::sync::Arc;
///
/// let dataset = Arc::new(
///     MemoryDataset::builder()
///         .resource("EPSG", "AreaOfUse", "1262;World;-90;-180;90;180;")
///         .resource("EPSG", "Alias", "Area;1262;Earth")
///         .build(),
/// );
/// let areas = ReferenceCollection::new(dataset, AreaOfUseConverter, CollectionOptions::default());
///
/// let world = areas.lookup("EPSG", 1262)?;
/// assert!(Arc::ptr_eq(&world, &areas.lookup_by_name("earth")?));
/// # Ok::<(), georef_reference::ReferenceError>(())
/// ```
pub struct ReferenceCollection<C: RowConverter> {
    dataset: Arc<dyn Dataset>,
    converter: C,
    options: CollectionOptions,
    aliases: AliasIndex,
    cache: Cache<ReferenceKey, Arc<C::Output>>,
    diagnostics: Arc<Diagnostics>,
}

impl<C: RowConverter> fmt::Debug for ReferenceCollection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceCollection")
            .field("family", &C::FAMILY)
            .field("options", &self.options)
            .field("cached", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

impl<C: RowConverter> ReferenceCollection<C> {
    pub fn new(dataset: Arc<dyn Dataset>, converter: C, options: CollectionOptions) -> Self {
        Self::with_diagnostics(dataset, converter, options, Arc::default())
    }

    /// Builds a collection recording skipped rows into `diagnostics`, which a converter
    /// may share for its own child-row indexes.
    pub fn with_diagnostics(
        dataset: Arc<dyn Dataset>,
        converter: C,
        options: CollectionOptions,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        let aliases = AliasIndex::new(
            Arc::clone(&dataset),
            C::FAMILY,
            options.alias_scope,
            options.malformed_rows,
            Arc::clone(&diagnostics),
        );
        Self {
            dataset,
            converter,
            options,
            aliases,
            cache: Cache::builder().name(C::FAMILY.resource()).build(),
            diagnostics,
        }
    }

    #[must_use]
    pub const fn family(&self) -> Family {
        C::FAMILY
    }

    #[must_use]
    pub const fn options(&self) -> &CollectionOptions {
        &self.options
    }

    #[must_use]
    pub const fn converter(&self) -> &C {
        &self.converter
    }

    /// The object with `code` in `authority`.
    ///
    /// # Errors
    /// [`ReferenceError::NotFound`] when no row of this family carries the key (or the
    /// authority is unknown), [`ReferenceError::MalformedRecord`] when the row for the key
    /// is malformed, and any nested resolution failure.
    #[instrument(level = "debug", skip(self), fields(family = %C::FAMILY))]
    pub fn lookup(&self, authority: &str, code: i32) -> Result<Arc<C::Output>, ReferenceError> {
        self.lookup_key(&ReferenceKey::new(authority, code))
    }

    /// Like [`ReferenceCollection::lookup`], keyed by a [`ReferenceKey`].
    pub fn lookup_key(&self, key: &ReferenceKey) -> Result<Arc<C::Output>, ReferenceError> {
        self.resolve_in(key, &mut Resolution::default())
    }

    /// Looks up `key` as one step of an ongoing resolution chain.
    ///
    /// # Errors
    /// As [`ReferenceCollection::lookup`], plus [`ReferenceError::CircularReference`] when
    /// the key is already being resolved by this chain.
    pub fn resolve_in(
        &self,
        key: &ReferenceKey,
        resolution: &mut Resolution,
    ) -> Result<Arc<C::Output>, ReferenceError> {
        if let Some(hit) = self.cache.get(key) {
            trace!(family = %C::FAMILY, %key, "Cache hit");
            return Ok(hit);
        }
        if !self.dataset.has_authority(key.authority.as_str()) {
            return Err(self.not_found(key));
        }

        resolution.enter(C::FAMILY, key)?;
        let outcome = self.cache.try_get_with(key.clone(), || self.scan(key, resolution));
        resolution.leave();

        outcome.map_err(|miss| match Arc::unwrap_or_clone(miss) {
            Miss::Absent => self.not_found(key),
            Miss::Failed(err) => err,
        })
    }

    /// `false` only when the key does not exist; every other failure propagates.
    ///
    /// # Errors
    /// As [`ReferenceCollection::lookup`], except [`ReferenceError::NotFound`].
    pub fn contains(&self, authority: &str, code: i32) -> Result<bool, ReferenceError> {
        match self.lookup(authority, code) {
            Ok(_) => Ok(true),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// The object whose primary name or alias equals `name`, in the default authority.
    ///
    /// # Errors
    /// See [`ReferenceCollection::lookup_by_name_in`].
    pub fn lookup_by_name(&self, name: &str) -> Result<Arc<C::Output>, ReferenceError> {
        let authority = self.options.default_authority.clone();
        self.lookup_by_name_in(authority.as_str(), name)
    }

    /// The object whose primary name or alias equals `name` (ASCII case-insensitive,
    /// surrounding blanks ignored). Among several matches the lowest code wins.
    ///
    /// # Errors
    /// [`ReferenceError::NameNotFound`] when nothing of this family matches;
    /// [`ReferenceError::MalformedRecord`] when the lowest-coded match is malformed, under
    /// either policy; dataset, alias and nested resolution failures otherwise.
    #[instrument(level = "debug", skip(self), fields(family = %C::FAMILY))]
    pub fn lookup_by_name_in(&self, authority: &str, name: &str) -> Result<Arc<C::Output>, ReferenceError> {
        let authority = Authority::new(authority);
        let wanted = name.trim();
        let name_not_found =
            || ReferenceError::NameNotFound { family: C::FAMILY, authority: authority.clone(), name: wanted.to_owned() };

        if !self.dataset.has_authority(authority.as_str()) {
            return Err(name_not_found());
        }

        let aliased = self.aliases.codes_named(&authority, wanted)?;
        let mut candidates: Vec<(i32, Row)> = Vec::new();
        for row in self.rows(&authority)? {
            let Some(code) = self.code_of(&authority, &row)? else { continue };
            let named = row.get(NAME_COLUMN).is_some_and(|n| n.eq_ignore_ascii_case(wanted));
            if named || aliased.contains(&code) {
                candidates.push((code, row));
            }
        }
        candidates.sort_by_key(|(code, _)| *code);

        // A named row that fails to convert is the requested object, never skipped.
        for (code, row) in candidates {
            let key = ReferenceKey { authority: authority.clone(), code };
            if let Some(found) = self.get_or_convert(&key, &row)? {
                return Ok(found);
            }
        }
        Err(name_not_found())
    }

    /// Every object of this family in the default authority, in dataset order.
    ///
    /// # Errors
    /// See [`ReferenceCollection::all_in`].
    pub fn all(&self) -> Result<All<'_, C>, ReferenceError> {
        let authority = self.options.default_authority.clone();
        self.all_in(authority.as_str())
    }

    /// A lazy iterator converting every row of `authority` that belongs to this family.
    ///
    /// Objects already cached are reused; the rest are built and cached as the iterator
    /// advances. Under [`crate::MalformedRowPolicy::Skip`] malformed rows are skipped, otherwise
    /// they are yielded as errors. An unknown authority yields nothing.
    ///
    /// # Errors
    /// [`ReferenceError::ResourceNotFound`] and dataset failures opening the resource.
    pub fn all_in(&self, authority: &str) -> Result<All<'_, C>, ReferenceError> {
        let authority = Authority::new(authority);
        let rows = if self.dataset.has_authority(authority.as_str()) { Some(self.rows(&authority)?) } else { None };
        Ok(All { collection: self, authority, rows })
    }

    /// Malformed rows skipped so far by this collection and its alias index.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.snapshot()
    }

    /// Number of objects built so far.
    #[must_use]
    pub fn cached_len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    fn rows(&self, authority: &Authority) -> Result<Rows, ReferenceError> {
        Ok(self.dataset.rows(authority.as_str(), C::FAMILY.resource())?)
    }

    fn not_found(&self, key: &ReferenceKey) -> ReferenceError {
        ReferenceError::NotFound { family: C::FAMILY, key: key.clone() }
    }

    /// Scans for the first row with the key's code that converts for this family.
    fn scan(&self, key: &ReferenceKey, resolution: &mut Resolution) -> Result<Arc<C::Output>, Miss> {
        debug!(family = %C::FAMILY, %key, "Cache miss, scanning rows");
        let rows = self.rows(&key.authority).map_err(Miss::Failed)?;

        for row in rows {
            let Some(code) = self.code_of(&key.authority, &row).map_err(Miss::Failed)? else { continue };
            if code != key.code {
                continue;
            }
            if let Some(object) = self.convert(&key.authority, &row, resolution).map_err(Miss::Failed)? {
                return Ok(Arc::new(object));
            }
        }
        Err(Miss::Absent)
    }

    /// Returns the cached object for `key`, or builds it from `row` as a new chain.
    fn get_or_convert(&self, key: &ReferenceKey, row: &Row) -> Result<Option<Arc<C::Output>>, ReferenceError> {
        if let Some(hit) = self.cache.get(key) {
            return Ok(Some(hit));
        }

        let mut resolution = Resolution::default();
        resolution.enter(C::FAMILY, key)?;
        let outcome = self.cache.try_get_with(key.clone(), || match self.convert(&key.authority, row, &mut resolution) {
            Ok(Some(object)) => Ok(Arc::new(object)),
            Ok(None) => Err(Miss::Absent),
            Err(err) => Err(Miss::Failed(err)),
        });

        match outcome {
            Ok(object) => Ok(Some(object)),
            Err(miss) => match Arc::unwrap_or_clone(miss) {
                Miss::Absent => Ok(None),
                Miss::Failed(err) => Err(err),
            },
        }
    }

    fn convert(
        &self,
        authority: &Authority,
        row: &Row,
        resolution: &mut Resolution,
    ) -> Result<Option<C::Output>, ReferenceError> {
        let mut ctx = ConvertContext::new(C::FAMILY, authority, row, &self.aliases, resolution);
        ctx.expect_columns(C::COLUMNS)?;
        self.converter.convert(row, &mut ctx)
    }

    /// The code of a row, or `None` for a skipped row with a non-numeric code.
    fn code_of(&self, authority: &Authority, row: &Row) -> Result<Option<i32>, ReferenceError> {
        if let Some(code) = row.code() {
            return Ok(Some(code));
        }
        let raw = row.get(CODE_COLUMN).unwrap_or_default();
        self.skip_or_fail(ReferenceError::MalformedRecord {
            family: C::FAMILY,
            authority: authority.clone(),
            resource: C::FAMILY.resource().into(),
            line: row.line(),
            message: format!("non-numeric code '{raw}'").into(),
            context: None,
        })?;
        Ok(None)
    }

    fn skip_or_fail(&self, err: ReferenceError) -> Result<(), ReferenceError> {
        self.diagnostics.handle(self.options.malformed_rows, err)
    }
}

/// Iterator returned by [`ReferenceCollection::all_in`].
pub struct All<'a, C: RowConverter> {
    collection: &'a ReferenceCollection<C>,
    authority: Authority,
    rows: Option<Rows>,
}

impl<C: RowConverter> fmt::Debug for All<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All").field("family", &C::FAMILY).field("authority", &self.authority).finish_non_exhaustive()
    }
}

impl<C: RowConverter> Iterator for All<'_, C> {
    type Item = Result<Arc<C::Output>, ReferenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rows = self.rows.as_mut()?;
        for row in rows.by_ref() {
            let code = match self.collection.code_of(&self.authority, &row) {
                Ok(Some(code)) => code,
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            };
            let key = ReferenceKey { authority: self.authority.clone(), code };
            match self.collection.get_or_convert(&key, &row) {
                Ok(Some(object)) => return Some(Ok(object)),
                Ok(None) => {},
                Err(err) => {
                    if let Err(err) = self.collection.skip_or_fail(err) {
                        return Some(Err(err));
                    }
                },
            }
        }
        None
    }
}
