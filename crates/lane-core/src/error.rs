//! # Error Types
//!
//! Format-descriptor errors for lane-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lane-core errors (this file)                                          │
//! │  └── FormatError      - Rejected BarcodeFormat descriptors             │
//! │                                                                         │
//! │  lane-scan errors (separate crate)                                     │
//! │  ├── ScanError        - Scan/resolve failures shown to the operator    │
//! │  └── CollaboratorError- Catalog / cart call failures                   │
//! │                                                                         │
//! │  Note: a scan that matches NO format is not an error here - the        │
//! │  decoder reports `DecodedScan::Unrecognized` and the session layer     │
//! │  decides what that means for the active mode.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (format name, ranges)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Errors raised when a [`BarcodeFormat`](crate::format::BarcodeFormat)
/// descriptor is structurally invalid.
///
/// These are caught at registration time, so the decoder itself never has
/// to re-validate a format mid-scan.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    /// A digit range reaches past the declared total length.
    ///
    /// ## When This Occurs
    /// - Hand-written `scanner.toml` entry with a typo'd range
    /// - A format registered with `end` and `start` swapped
    #[error("format '{name}': range {start}..{end} exceeds total length {total_length}")]
    RangeOutOfBounds {
        name: String,
        start: usize,
        end: usize,
        total_length: usize,
    },

    /// A digit range is empty (`start >= end`), so there is nothing to
    /// extract.
    #[error("format '{name}': range {start}..{end} is empty")]
    EmptyRange {
        name: String,
        start: usize,
        end: usize,
    },

    /// The code range and quantity range overlap; a digit cannot belong to
    /// both the product code and the quantity.
    #[error("format '{name}': code and quantity ranges overlap")]
    OverlappingRanges { name: String },

    /// The divisor is zero, which would make every quantity undefined.
    #[error("format '{name}': divisor must be positive")]
    ZeroDivisor { name: String },

    /// Quantity bounds are inverted (min >= max), so no quantity could
    /// ever be accepted.
    #[error("format '{name}': quantity bounds ({min}, {max}) admit no value")]
    EmptyBounds { name: String, min: f64, max: f64 },
}

/// Convenience type alias for Results with FormatError.
pub type FormatResult<T> = Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FormatError::RangeOutOfBounds {
            name: "scale-10".to_string(),
            start: 5,
            end: 12,
            total_length: 10,
        };
        assert_eq!(
            err.to_string(),
            "format 'scale-10': range 5..12 exceeds total length 10"
        );

        let err = FormatError::ZeroDivisor {
            name: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "format 'bad': divisor must be positive");
    }
}
