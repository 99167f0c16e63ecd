//! # lane-core: Pure Scan Logic for Lane POS
//!
//! This crate is the **heart** of the Lane POS scan engine. It decides what
//! a terminated input line *is* (free text, plain barcode, scale barcode)
//! and what a scale barcode *says* (product code + weight), as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Lane POS Scan Engine                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal Frontend                            │   │
//! │  │    Search field ──► Mode buttons ──► Cart display               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ key events / toggles                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 lane-scan (session layer)                       │   │
//! │  │    ScanSession, ModeController, Resolver, collaborators        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lane-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  format   │  │  decode   │  │   mode    │  │  types    │  │   │
//! │  │   │ FormatTbl │  │  Decoder  │  │ ScanMode  │  │ProductRef │  │   │
//! │  │   │ BarcodeFmt│  │DecodedScan│  │transitions│  │ResolvedLn │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`format`] - The scale-barcode format table (data, not branches)
//! - [`decode`] - Decoding raw digit strings against the table
//! - [`mode`] - The three-state scan mode and its transitions
//! - [`types`] - UI-facing domain types (ProductRef, ResolvedLine)
//! - [`search`] - Pure free-text result ranking
//! - [`error`] - Format descriptor errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every decode is deterministic - same input = same output
//! 2. **No I/O**: Catalog, cart, and UI access is FORBIDDEN here
//! 3. **Data over branches**: Label conventions are table entries, never
//!    competing `if` arms - new conventions are additive
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use lane_core::decode::{DecodedScan, Decoder};
//! use lane_core::format::FormatTable;
//!
//! let decoder = Decoder::new(FormatTable::builtin());
//!
//! // A 10-digit scale label: 5-digit code, 5-digit grams
//! match decoder.decode_scale("1234512000") {
//!     DecodedScan::Scale { product_code, quantity } => {
//!         assert_eq!(product_code, "12345");
//!         assert_eq!(quantity, 12.0); // 12000 g = 12 kg
//!     }
//!     _ => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod decode;
pub mod error;
pub mod format;
pub mod mode;
pub mod search;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use lane_core::ScanMode` instead of
// `use lane_core::mode::ScanMode`

pub use decode::{DecodedScan, Decoder};
pub use error::FormatError;
pub use format::{BarcodeFormat, FormatTable};
pub use mode::ScanMode;
pub use types::{ProductRef, ResolvedLine, StoreId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default store ID for single-store deployments.
///
/// ## Why a constant?
/// The catalog collaborator scopes every search to a store. Single-lane
/// installs have exactly one, and the terminal falls back to this value
/// when `scanner.toml` does not override it.
pub const DEFAULT_STORE_ID: &str = "store-001";

/// Grams per kilogram: the divisor every fielded scale-label convention
/// uses for its quantity digits.
pub const GRAMS_PER_KG: u32 = 1000;
