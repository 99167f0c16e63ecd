//! # Session Error Types
//!
//! The scan session's error taxonomy.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Scan Session                       │
//! │                                                                         │
//! │  Enter pressed                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Empty buffer / no format fits? ──► MalformedScan ─────┐               │
//! │       │                                                │               │
//! │       ▼                                                ▼               │
//! │  No exact catalog match? ───────► ProductNotFound ──► NotificationSink │
//! │       │                                                ▲  (failure)    │
//! │       ▼                                                │               │
//! │  Catalog/cart call failed? ─────► Collaborator ────────┘               │
//! │                                                                         │
//! │  EVERY error is local and recoverable: the buffer is cleared, the      │
//! │  mode is untouched, and the operator can immediately scan again.       │
//! │  Nothing here ever terminates the session.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Collaborator Error
// =============================================================================

/// A catalog or cart call failed or threw a transient error.
///
/// Caught at the session boundary and surfaced as a failure notification;
/// never propagated far enough to crash the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collaborator} unavailable: {message}")]
pub struct CollaboratorError {
    /// Which collaborator failed ("catalog" or "cart").
    pub collaborator: &'static str,

    /// Human-readable detail for the operator notification.
    pub message: String,
}

impl CollaboratorError {
    /// A catalog-search failure.
    pub fn catalog(message: impl Into<String>) -> Self {
        CollaboratorError {
            collaborator: "catalog",
            message: message.into(),
        }
    }

    /// A cart-mutation failure.
    pub fn cart(message: impl Into<String>) -> Self {
        CollaboratorError {
            collaborator: "cart",
            message: message.into(),
        }
    }
}

// =============================================================================
// Scan Error
// =============================================================================

/// Failures of a single submission. The `Display` text is what the
/// operator sees in the failure notification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// The buffer was empty, or no configured format fit in SCALE mode.
    #[error("invalid scale barcode: {raw:?}")]
    MalformedScan { raw: String },

    /// Decoding succeeded but no product matched the code exactly.
    #[error("no product found with code: {code}")]
    ProductNotFound { code: String },

    /// A collaborator call failed.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Convenience type alias for Results with ScanError.
pub type ScanResult<T> = Result<T, ScanError>;

// =============================================================================
// Config Error
// =============================================================================

/// Failures loading `scanner.toml`.
///
/// A missing file is NOT an error (defaults apply); these fire only when
/// a file exists and cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read scanner config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the expected shape.
    #[error("failed to parse scanner config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configured format entry violates the table invariants.
    #[error("invalid format in scanner config: {0}")]
    Format(#[from] lane_core::FormatError),
}

// =============================================================================
// Unit Tests
// =============================================================================
