use georef_domain::Authority;
use georef_domain::config::RegistryConfig;

pub use georef_domain::config::{AliasScope, MalformedRowPolicy};

/// Behaviour shared by every collection of one registry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionOptions {
    /// Authority for name lookups without an explicit one.
    pub default_authority: Authority,
    pub malformed_rows: MalformedRowPolicy,
    pub alias_scope: AliasScope,
}

impl CollectionOptions {
    #[must_use]
    pub fn with_default_authority(mut self, authority: impl Into<Authority>) -> Self {
        self.default_authority = authority.into();
        self
    }

    #[must_use]
    pub const fn with_malformed_rows(mut self, policy: MalformedRowPolicy) -> Self {
        self.malformed_rows = policy;
        self
    }

    #[must_use]
    pub const fn with_alias_scope(mut self, scope: AliasScope) -> Self {
        self.alias_scope = scope;
        self
    }
}

impl From<&RegistryConfig> for CollectionOptions {
    fn from(config: &RegistryConfig) -> Self {
        Self {
            default_authority: Authority::new(&config.default_authority),
            malformed_rows: config.malformed_rows,
            alias_scope: config.alias_scope,
        }
    }
}
