//! List filters for resource loads.

use crate::resources::{BrandId, CategoryId};

/// Filter applied to a [`ResourceClient::list`] call.
///
/// The default filter excludes archived records and applies no brand,
/// status, or category predicate. Builder methods follow the `with_*`
/// convention.
///
/// [`ResourceClient::list`]: crate::ResourceClient::list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    /// Include soft-deleted records in the listing.
    pub include_archived: bool,
    /// Restrict to records owned by this brand.
    pub scope: Option<BrandId>,
    /// Restrict to records with this status value (serialized form,
    /// e.g. `"suggested"`).
    pub status: Option<String>,
    /// Restrict to records filed under this category.
    pub category: Option<CategoryId>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include archived records.
    pub fn with_archived(mut self, include: bool) -> Self {
        self.include_archived = include;
        self
    }

    /// Restrict to one brand.
    pub fn with_scope(mut self, scope: BrandId) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set or clear the brand restriction. Used when re-deriving the
    /// effective filter after a selection change.
    pub fn scoped(mut self, scope: Option<BrandId>) -> Self {
        self.scope = scope;
        self
    }

    /// Restrict to one status value.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Restrict to one category.
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Render the filter as query parameters for the resource API.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.include_archived {
            pairs.push(("include_archived", "true".to_string()));
        }
        if let Some(scope) = self.scope {
            pairs.push(("brand_id", scope.to_string()));
        }
        if let Some(ref status) = self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(category) = self.category {
            pairs.push(("category_id", category.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_has_no_params() {
        assert!(ListFilter::new().query_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs_include_everything_set() {
        let brand = BrandId::new();
        let category = CategoryId::new();
        let pairs = ListFilter::new()
            .with_archived(true)
            .with_scope(brand)
            .with_status("suggested")
            .with_category(category)
            .query_pairs();

        assert_eq!(pairs.len(), 4);
        assert!(pairs.contains(&("include_archived", "true".to_string())));
        assert!(pairs.contains(&("brand_id", brand.to_string())));
        assert!(pairs.contains(&("status", "suggested".to_string())));
        assert!(pairs.contains(&("category_id", category.to_string())));
    }

    #[test]
    fn test_scoped_replaces_and_clears() {
        let first = BrandId::new();
        let second = BrandId::new();

        let filter = ListFilter::new().with_scope(first).scoped(Some(second));
        assert_eq!(filter.scope, Some(second));

        let cleared = filter.scoped(None);
        assert_eq!(cleared.scope, None);
    }
}
