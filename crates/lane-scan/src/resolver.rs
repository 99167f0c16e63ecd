//! # Exact-Match Resolver
//!
//! Adapts the catalog's fuzzy search into a keyed lookup.
//!
//! ## Why Two Steps?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Fuzzy Search, Then Exact Filter                         │
//! │                                                                         │
//! │  resolve_exact("999")                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.search("999", store) ──► [ {sku:"9999"}, {sku:"999"} ]        │
//! │       │                              substring hits, any order         │
//! │       ▼                                                                 │
//! │  post-filter: sku == "999" OR barcode == "999"  (char-for-char)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Some({sku:"999"})   - first exact match in returned order             │
//! │                                                                         │
//! │  WITHOUT the filter, a scanned barcode that is a prefix of another     │
//! │  SKU would silently add the wrong product to the sale.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two steps stay explicit (not folded into one call) so the
//! exactness guarantee is testable independent of how the catalog ranks
//! its hits.

use tracing::debug;

use crate::collaborators::ProductCatalog;
use crate::error::CollaboratorError;
use lane_core::{ProductRef, StoreId};

/// Exact-match lookup over a fuzzy catalog collaborator.
#[derive(Debug, Clone)]
pub struct Resolver<C> {
    catalog: C,
    store: StoreId,
}

impl<C: ProductCatalog> Resolver<C> {
    /// Creates a resolver scoped to one store.
    pub fn new(catalog: C, store: StoreId) -> Self {
        Resolver { catalog, store }
    }

    /// The store every lookup is scoped to.
    pub fn store(&self) -> &StoreId {
        &self.store
    }

    /// Raw catalog search, for the free-text path.
    pub async fn search(&self, query: &str) -> Result<Vec<ProductRef>, CollaboratorError> {
        debug!(query = %query, store = %self.store, "catalog search");
        self.catalog.search(query, &self.store).await
    }

    /// Looks up a product whose SKU or barcode equals `code` exactly.
    ///
    /// ## Returns
    /// - `Ok(Some(product))` - first exact match in catalog order
    /// - `Ok(None)` - the catalog answered, but only with fuzzy hits
    /// - `Err(_)` - the catalog call itself failed
    pub async fn resolve_exact(
        &self,
        code: &str,
    ) -> Result<Option<ProductRef>, CollaboratorError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let candidates = self.search(code).await?;
        let hit = candidates.into_iter().find(|p| p.matches_code(code));

        match &hit {
            Some(product) => debug!(code = %code, sku = %product.sku, "exact match"),
            None => debug!(code = %code, "no exact match among candidates"),
        }
        Ok(hit)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
