//! # Domain Types
//!
//! UI-facing types shared between the scan engine and its collaborators.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductRef    │   │  ResolvedLine   │   │    StoreId      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  product_id     │   │  newtype String │       │
//! │  │  sku (business) │   │  quantity       │   │  scopes every   │       │
//! │  │  barcode        │   │  is_weighted    │   │  catalog search │       │
//! │  │  name           │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ProductRef comes FROM the catalog collaborator; ResolvedLine goes     │
//! │  TO the cart collaborator and has no life beyond that hand-off.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::DEFAULT_STORE_ID;

// =============================================================================
// Store ID
// =============================================================================

/// The store scope for catalog searches.
///
/// A newtype rather than a bare `String` so a query and a scope can never
/// be swapped at a call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StoreId(String);

impl StoreId {
    /// Creates a store ID.
    pub fn new(id: impl Into<String>) -> Self {
        StoreId(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StoreId {
    fn default() -> Self {
        StoreId(DEFAULT_STORE_ID.to_string())
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product Reference
// =============================================================================

/// A product candidate returned by the catalog collaborator.
///
/// This is a *reference*, not the full catalog record: the scan engine
/// only needs the fields it matches on and the name it shows the
/// operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRef {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Barcode (EAN-13, UPC-A, etc.).
    pub barcode: Option<String>,

    /// Display name shown to the cashier.
    pub name: String,
}

impl ProductRef {
    /// Whether this product's SKU or barcode equals `code`
    /// character-for-character.
    ///
    /// This is the exactness guarantee the resolver post-filters with: a
    /// fuzzy hit that merely *contains* the code must never be accepted,
    /// or a scanned barcode that is a prefix of another SKU would add the
    /// wrong product.
    pub fn matches_code(&self, code: &str) -> bool {
        self.sku == code || self.barcode.as_deref() == Some(code)
    }
}

// =============================================================================
// Resolved Line
// =============================================================================

/// The unit handed to the cart collaborator after a successful resolution.
///
/// ## Lifecycle
/// Created only once a catalog lookup confirms an exact field match, and
/// forwarded to the cart exactly once; it has no persistent lifecycle in
/// this engine.
///
/// ## Invariant
/// `quantity > 0` always - unit lines carry `1.0` and weighed lines carry
/// a decoder quantity whose formats forbid non-positive weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResolvedLine {
    /// Product ID (UUID) confirmed by the resolver.
    pub product_id: String,

    /// Units for plain barcodes, kilograms for scale labels.
    pub quantity: f64,

    /// Whether `quantity` is a weight rather than a unit count.
    pub is_weighted_item: bool,
}

impl ResolvedLine {
    /// One unit of a directly-matched product.
    pub fn unit(product_id: impl Into<String>) -> Self {
        ResolvedLine {
            product_id: product_id.into(),
            quantity: 1.0,
            is_weighted_item: false,
        }
    }

    /// A weighed line from a decoded scale label.
    pub fn weighed(product_id: impl Into<String>, kilograms: f64) -> Self {
        ResolvedLine {
            product_id: product_id.into(),
            quantity: kilograms,
            is_weighted_item: true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
