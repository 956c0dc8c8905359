//! Recognized commit types and scopes.

use chlog_config::{CommitsConfig, TypeConfig};

/// Ordered type and scope lists used for filtering, ranking and section labels.
///
/// A value's rank is its index in the list; values not in the list rank last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    types: Vec<TypeConfig>,
    scopes: Vec<String>,
}

impl Taxonomy {
    /// Creates a taxonomy from explicit type and scope lists.
    #[must_use]
    pub fn new(types: Vec<TypeConfig>, scopes: Vec<String>) -> Self {
        Self { types, scopes }
    }

    /// Creates a taxonomy from the `[commits]` configuration section.
    #[must_use]
    pub fn from_config(config: &CommitsConfig) -> Self {
        Self::new(config.types.clone(), config.scopes.clone())
    }

    /// Returns true if `ty` is a recognized commit type.
    #[must_use]
    pub fn is_known_type(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t.name == ty)
    }

    /// Returns the priority of a commit type.
    #[must_use]
    pub fn type_rank(&self, ty: &str) -> usize {
        self.types
            .iter()
            .position(|t| t.name == ty)
            .unwrap_or(self.types.len())
    }

    /// Returns the priority of a scope.
    #[must_use]
    pub fn scope_rank(&self, scope: &str) -> usize {
        self.scopes
            .iter()
            .position(|s| s == scope)
            .unwrap_or(self.scopes.len())
    }

    /// Returns the section heading for a commit type, or the type itself if unknown.
    #[must_use]
    pub fn label<'a>(&'a self, ty: &'a str) -> &'a str {
        self.types
            .iter()
            .find(|t| t.name == ty)
            .map_or(ty, |t| t.label.as_str())
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::from_config(&CommitsConfig::default())
    }
}
