use crate::error::ReferenceError;
use crate::options::MalformedRowPolicy;
use fxhash::FxHashSet;
use georef_domain::{Authority, Family};
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fmt;
use tracing::warn;

/// A malformed row that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub family: Family,
    pub authority: Authority,
    pub resource: Cow<'static, str>,
    pub line: usize,
    pub message: Cow<'static, str>,
}

impl Diagnostic {
    /// The diagnostic of a [`ReferenceError::MalformedRecord`].
    #[must_use]
    pub fn from_error(err: &ReferenceError) -> Option<Self> {
        match err {
            ReferenceError::MalformedRecord { family, authority, resource, line, message, .. } => Some(Self {
                family: *family,
                authority: authority.clone(),
                resource: resource.clone(),
                line: *line,
                message: message.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}:{}: {}", self.family, self.authority, self.resource, self.line, self.message)
    }
}

#[derive(Debug, Default)]
struct DiagnosticLog {
    entries: Vec<Diagnostic>,
    seen: FxHashSet<(Authority, Cow<'static, str>, usize)>,
}

/// Skipped rows of one collection and its indexes, one entry per physical row.
#[derive(Debug, Default)]
pub struct Diagnostics {
    log: Mutex<DiagnosticLog>,
}

impl Diagnostics {
    /// Applies `policy` to a malformed-row error: `Abort` returns it, `Skip` records it.
    ///
    /// Errors other than [`ReferenceError::MalformedRecord`] are always returned.
    pub(crate) fn handle(&self, policy: MalformedRowPolicy, err: ReferenceError) -> Result<(), ReferenceError> {
        if policy == MalformedRowPolicy::Abort {
            return Err(err);
        }
        let Some(diagnostic) = Diagnostic::from_error(&err) else {
            return Err(err);
        };

        let mut log = self.log.lock();
        let row = (diagnostic.authority.clone(), diagnostic.resource.clone(), diagnostic.line);
        if log.seen.insert(row) {
            warn!(%diagnostic, "Skipping malformed row");
            log.entries.push(diagnostic);
        }
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.log.lock().entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.lock().entries.len()
    }
}
