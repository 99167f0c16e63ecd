//! # Scan Decoding
//!
//! Turns a raw scanned string into either an exact-match candidate or a
//! parsed (product code, quantity) pair.
//!
//! ## Decode Walk
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    decode_scale("1234512000")                           │
//! │                                                                         │
//! │  trim ──► "1234512000" (10 ASCII digits)                               │
//! │       │                                                                 │
//! │       ▼  walk the table in priority order                              │
//! │  ean13-embedded (len 13) ──── length mismatch ──────────► skip         │
//! │  scale-5x5      (len 10) ──── matches                                  │
//! │       │   code  = raw[0..5]          = "12345"                         │
//! │       │   grams = raw[5..10] parsed  = 12000                           │
//! │       │   qty   = 12000 / 1000       = 12.0   ∈ (0, 100) ✓            │
//! │       ▼                                                                 │
//! │  Scale { product_code: "12345", quantity: 12.0 }                       │
//! │                                                                         │
//! │  A bounds failure is NOT terminal: the walk continues to the next      │
//! │  structurally-matching format (e.g. scale-4x5-padded, same length      │
//! │  but unbounded). Only exhausting the table yields Unrecognized.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::FormatTable;

// =============================================================================
// Decoded Scan
// =============================================================================

/// The interpretation of one terminated input line.
///
/// `Exact` carries a candidate for exact catalog matching - the decoder
/// never validates it. `Scale` carries a parsed product code plus a
/// quantity in kilograms; `quantity > 0` is a hard invariant (formats with
/// a non-positive lower bound cannot be registered).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum DecodedScan {
    /// The trimmed scan, unmodified, to be matched against SKU/barcode.
    Exact { code: String },

    /// A scale label: short product code plus weight in kilograms.
    #[serde(rename_all = "camelCase")]
    Scale { product_code: String, quantity: f64 },

    /// No configured format matched.
    Unrecognized,
}

impl DecodedScan {
    /// Whether this scan parsed as a scale label.
    pub fn is_scale(&self) -> bool {
        matches!(self, DecodedScan::Scale { .. })
    }
}

// =============================================================================
// Decoder
// =============================================================================

/// Decodes raw scans against a [`FormatTable`].
///
/// Pure and deterministic: the table's total order means the first
/// structurally-valid, bounds-satisfying format always wins, so the same
/// scan can never decode two ways on one terminal.
#[derive(Debug, Clone)]
pub struct Decoder {
    table: FormatTable,
}

impl Decoder {
    /// Creates a decoder over the given table.
    pub fn new(table: FormatTable) -> Self {
        Decoder { table }
    }

    /// The table this decoder walks.
    pub fn table(&self) -> &FormatTable {
        &self.table
    }

    /// Returns the trimmed scan as an exact-match candidate.
    ///
    /// No validation happens here: whether the candidate means anything is
    /// decided by the resolver's exact catalog lookup.
    pub fn decode_exact<'a>(&self, raw: &'a str) -> &'a str {
        raw.trim()
    }

    /// Tries each format in priority order and parses the first fit.
    ///
    /// ## Behavior
    /// - Empty or whitespace-only input is always `Unrecognized`
    /// - A format must match structurally (length, digits, prefix) AND
    ///   yield an in-bounds quantity; a bounds failure falls through to
    ///   the next format
    /// - A scan whose length matches two formats resolves by table
    ///   priority, never by dual evaluation
    pub fn decode_scale(&self, raw: &str) -> DecodedScan {
        let raw = raw.trim();

        // Scanner wedges emit ASCII; anything else can't be sliced by
        // digit position and is never a scale label.
        if raw.is_empty() || !raw.is_ascii() {
            return DecodedScan::Unrecognized;
        }

        for format in self.table.formats() {
            if !format.matches(raw) {
                continue;
            }

            let Ok(ticks) = raw[format.quantity.clone()].parse::<u64>() else {
                // Reachable only for formats that relax digits_only.
                continue;
            };
            let quantity = ticks as f64 / f64::from(format.divisor);

            if !format.quantity_in_bounds(quantity) {
                continue;
            }

            return DecodedScan::Scale {
                product_code: raw[format.code.clone()].to_string(),
                quantity,
            };
        }

        DecodedScan::Unrecognized
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::BarcodeFormat;

    fn decoder() -> Decoder {
        Decoder::new(FormatTable::builtin())
    }

    #[test]
    fn test_decode_exact_trims_and_keeps_raw() {
        let d = decoder();
        assert_eq!(d.decode_exact("  5449000000996 \n"), "5449000000996");
        assert_eq!(d.decode_exact("COKE-330"), "COKE-330");
    }

    #[test]
    fn test_decode_scale_5x5() {
        // 5-digit code "12345", 12000 grams = 12 kg
        assert_eq!(
            decoder().decode_scale("1234512000"),
            DecodedScan::Scale {
                product_code: "12345".to_string(),
                quantity: 12.0,
            }
        );
    }

    #[test]
    fn test_decode_ean13_embedded() {
        // Prefix '2', code at [2,7), grams at [7,12); the leading "21" and
        // the final check digit never reach the decoded fields.
        assert_eq!(
            decoder().decode_scale("2123450120099"),
            DecodedScan::Scale {
                product_code: "23450".to_string(),
                quantity: 12.009,
            }
        );
    }

    #[test]
    fn test_decode_scale_4x5() {
        // 4-digit code "1234", 12345 grams = 12.345 kg, unbounded above
        assert_eq!(
            decoder().decode_scale("123412345"),
            DecodedScan::Scale {
                product_code: "1234".to_string(),
                quantity: 12.345,
            }
        );
    }

    #[test]
    fn test_length_ten_resolves_by_priority_not_dual_evaluation() {
        // Both scale-5x5 and scale-4x5-padded accept 10 digits; the 5x5
        // layout is registered first and wins.
        let scan = decoder().decode_scale("1234512000");
        assert_eq!(
            scan,
            DecodedScan::Scale {
                product_code: "12345".to_string(),
                quantity: 12.0,
            }
        );
    }

    #[test]
    fn test_bounds_failure_falls_through_to_next_format() {
        // Re-bound the 5x5 layout to (0, 10): 12 kg now fails its bounds
        // and the walk continues to the padded 4+5 layout, which reads the
        // same grams but a 4-digit code starting at index 1.
        let mut table = FormatTable::new();
        table
            .register(BarcodeFormat::new("scale-5x5", 10, 0..5, 5..10).with_max_quantity(10.0))
            .unwrap();
        table
            .register(BarcodeFormat::new("scale-4x5-padded", 10, 1..5, 5..10))
            .unwrap();

        assert_eq!(
            Decoder::new(table).decode_scale("1234512000"),
            DecodedScan::Scale {
                product_code: "2345".to_string(),
                quantity: 12.0,
            }
        );
    }

    #[test]
    fn test_padded_table_reads_ten_digits_as_4x5() {
        // A deployment configured with only the 4+5 convention: a 10-digit
        // scan is read with its leading digit ignored.
        let mut table = FormatTable::new();
        table
            .register(BarcodeFormat::new("scale-4x5-padded", 10, 1..5, 5..10))
            .unwrap();
        table
            .register(BarcodeFormat::new("scale-4x5", 9, 0..4, 4..9))
            .unwrap();

        assert_eq!(
            Decoder::new(table).decode_scale("0123412345"),
            DecodedScan::Scale {
                product_code: "1234".to_string(),
                quantity: 12.345,
            }
        );
    }

    #[test]
    fn test_zero_weight_is_never_a_scale_match() {
        // 0 grams fails every format's exclusive lower bound.
        assert_eq!(decoder().decode_scale("1234500000"), DecodedScan::Unrecognized);
    }

    #[test]
    fn test_wrong_prefix_is_unrecognized() {
        // 13 digits without the leading '2' match no format at all.
        assert_eq!(
            decoder().decode_scale("9123450120099"),
            DecodedScan::Unrecognized
        );
    }

    #[test]
    fn test_scan_serializes_with_type_tag() {
        // The frontend switches on the "type" tag when rendering how a
        // scan was interpreted.
        let json = serde_json::to_value(decoder().decode_scale("1234512000")).unwrap();
        assert_eq!(json["type"], "scale");
        assert_eq!(json["productCode"], "12345");
        assert_eq!(json["quantity"], 12.0);

        let json = serde_json::to_value(DecodedScan::Unrecognized).unwrap();
        assert_eq!(json["type"], "unrecognized");
    }

    #[test]
    fn test_empty_and_whitespace_unrecognized() {
        let d = decoder();
        assert_eq!(d.decode_scale(""), DecodedScan::Unrecognized);
        assert_eq!(d.decode_scale("   \t"), DecodedScan::Unrecognized);
    }

    #[test]
    fn test_letters_and_odd_lengths_unrecognized() {
        let d = decoder();
        assert_eq!(d.decode_scale("12345ABCDE"), DecodedScan::Unrecognized);
        assert_eq!(d.decode_scale("12345120001"), DecodedScan::Unrecognized);
        assert_eq!(d.decode_scale("département"), DecodedScan::Unrecognized);
    }

    #[test]
    fn test_unrelated_format_order_is_irrelevant() {
        // Registering formats of different lengths in any order never
        // changes the decode for a given input length.
        let mut reversed = FormatTable::new();
        for format in [
            BarcodeFormat::new("scale-4x5", 9, 0..4, 4..9),
            BarcodeFormat::new("scale-5x5", 10, 0..5, 5..10).with_max_quantity(100.0),
            BarcodeFormat::new("ean13-embedded", 13, 2..7, 7..12)
                .with_prefix('2')
                .with_max_quantity(100.0),
        ] {
            reversed.register(format).unwrap();
        }
        let shuffled = Decoder::new(reversed);

        for scan in ["1234512000", "2123450120099", "123412345"] {
            assert_eq!(shuffled.decode_scale(scan), decoder().decode_scale(scan));
        }
    }
}
