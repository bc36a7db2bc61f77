use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The authority every bundled dataset is keyed by.
pub const EPSG: &str = "EPSG";

/// A code namespace such as `EPSG`. Names are trimmed and upper-cased, so `"epsg"` and
/// `"EPSG"` are the same authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Authority(Arc<str>);

impl Authority {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name.trim().to_ascii_uppercase()))
    }

    #[must_use]
    pub fn epsg() -> Self {
        Self::new(EPSG)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self::epsg()
    }
}

impl From<&str> for Authority {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Authority {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&Self> for Authority {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

impl From<Authority> for String {
    fn from(value: Authority) -> Self {
        value.0.as_ref().to_owned()
    }
}

impl AsRef<str> for Authority {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `(authority, code)` pair that identifies one object within a family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReferenceKey {
    pub authority: Authority,
    pub code: i32,
}

impl ReferenceKey {
    #[must_use]
    pub fn new(authority: impl Into<Authority>, code: i32) -> Self {
        Self { authority: authority.into(), code }
    }

    /// Parses `AUTHORITY:code`, `AUTHORITY::code` or a bare `code`, the latter within
    /// `default_authority`. Returns `None` for anything else.
    ///
    /// ```rust
    /// use georef_domain::{Authority, ReferenceKey};
    ///
    /// let epsg = Authority::epsg();
    /// assert_eq!(ReferenceKey::parse("4326", &epsg), Some(ReferenceKey::new("EPSG", 4326)));
    /// assert_eq!(ReferenceKey::parse("ignf::7", &epsg), Some(ReferenceKey::new("IGNF", 7)));
    /// assert_eq!(ReferenceKey::parse("EPSG:x", &epsg), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str, default_authority: &Authority) -> Option<Self> {
        let text = text.trim();
        match text.rsplit_once(':') {
            Some((authority, code)) => {
                let authority = authority.trim_end_matches(':').trim();
                if authority.is_empty() {
                    return None;
                }
                Some(Self::new(authority, code.trim().parse().ok()?))
            },
            None => Some(Self::new(default_authority, text.parse().ok()?)),
        }
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.authority, self.code)
    }
}

/// Identification shared by every domain object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    #[serde(flatten)]
    pub key: ReferenceKey,
    pub name: String,
    /// Alternate names in dataset order; possibly empty.
    pub aliases: Vec<String>,
    pub remarks: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(key: ReferenceKey, name: impl Into<String>) -> Self {
        Self { key, name: name.into(), aliases: Vec::new(), remarks: None }
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: Option<String>) -> Self {
        self.remarks = remarks.filter(|r| !r.trim().is_empty());
        self
    }
}

/// Common read access to an object's [`Identity`].
pub trait IdentifiedObject {
    fn identity(&self) -> &Identity;

    fn key(&self) -> &ReferenceKey {
        &self.identity().key
    }

    fn authority(&self) -> &Authority {
        &self.identity().key.authority
    }

    fn code(&self) -> i32 {
        self.identity().key.code
    }

    fn name(&self) -> &str {
        &self.identity().name
    }

    fn aliases(&self) -> &[String] {
        &self.identity().aliases
    }

    fn remarks(&self) -> Option<&str> {
        self.identity().remarks.as_deref()
    }

    /// Case-insensitive match of a trimmed name against the primary name or any alias.
    fn matches_name(&self, name: &str) -> bool {
        let wanted = name.trim();
        let identity = self.identity();
        identity.name.trim().eq_ignore_ascii_case(wanted)
            || identity.aliases.iter().any(|a| a.trim().eq_ignore_ascii_case(wanted))
    }
}

impl IdentifiedObject for Identity {
    fn identity(&self) -> &Identity {
        self
    }
}

impl<T: IdentifiedObject + ?Sized> IdentifiedObject for Arc<T> {
    fn identity(&self) -> &Identity {
        (**self).identity()
    }
}

/// Implements [`IdentifiedObject`] for structs with an `identity` field.
macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::identity::IdentifiedObject for $ty {
                fn identity(&self) -> &$crate::identity::Identity {
                    &self.identity
                }
            }
        )+
    };
}

pub(crate) use identified;
