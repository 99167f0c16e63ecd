//! # Barcode Format Table
//!
//! The registry of recognized scale-barcode encodings.
//!
//! ## Why a Table?
//! Scale labels are printed by in-store hardware that predates this
//! terminal, and two incompatible digit layouts are live in the field at
//! once. Hard-coding each layout as an `if` arm made the old front end
//! fork into two copies of the same decode routine; here every convention
//! is a **data row**, and supporting a new labeler is a new row, not new
//! code.
//!
//! ## Fielded Conventions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scale Label Layouts                                  │
//! │                                                                         │
//! │  ean13-embedded (13 digits, leading '2')                               │
//! │    2 C C C C C C Q Q Q Q Q K                                           │
//! │      └── code ──┘ └─ grams ─┘                                          │
//! │        [2,7)        [7,12)      weight = grams / 1000, 0 < w < 100     │
//! │                                                                         │
//! │  scale-5x5 (10 digits)                                                 │
//! │    C C C C C Q Q Q Q Q                                                 │
//! │    └─ code ─┘└─ grams ─┘                                               │
//! │      [0,5)     [5,10)           weight = grams / 1000, 0 < w < 100     │
//! │                                                                         │
//! │  scale-4x5-padded (10 digits, first digit ignored)                     │
//! │    X C C C C Q Q Q Q Q                                                 │
//! │      └ code ┘└─ grams ─┘                                               │
//! │       [1,5)     [5,10)          weight = grams / 1000, unbounded       │
//! │                                                                         │
//! │  scale-4x5 (9 digits)                                                  │
//! │    C C C C Q Q Q Q Q                                                   │
//! │    └ code ┘└─ grams ─┘                                                 │
//! │     [0,4)    [4,9)              weight = grams / 1000, unbounded       │
//! │                                                                         │
//! │  PRIORITY: longest first; at equal length, registration order wins.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "First digit ignored" is not a special case in the decoder: the padded
//! variant simply declares absolute ranges that skip index 0.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, FormatResult};
use crate::GRAMS_PER_KG;

// =============================================================================
// Barcode Format
// =============================================================================

/// An immutable descriptor for one scale-label digit layout.
///
/// ## Invariants (enforced at registration)
/// - `code` and `quantity` each fit inside `[0, total_length)`
/// - `code` and `quantity` do not overlap
/// - `divisor > 0`
/// - the quantity bounds admit at least one value
///
/// ## Serialization
/// Formats deserialize from `scanner.toml` entries:
/// ```toml
/// [[formats]]
/// name = "scale-6x6"
/// total_length = 12
/// code = { start = 0, end = 6 }
/// quantity = { start = 6, end = 12 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeFormat {
    /// Human-readable label, used in logs and config errors.
    pub name: String,

    /// Exact scan length this format applies to.
    pub total_length: usize,

    /// Whether every character must be an ASCII digit.
    #[serde(default = "default_digits_only")]
    pub digits_only: bool,

    /// Required first character, if any (e.g. `'2'` for embedded EAN-13).
    #[serde(default)]
    pub prefix: Option<char>,

    /// Digit positions holding the product code.
    pub code: Range<usize>,

    /// Digit positions holding the encoded quantity.
    pub quantity: Range<usize>,

    /// The quantity digits divided by this give kilograms (or units).
    #[serde(default = "default_divisor")]
    pub divisor: u32,

    /// Exclusive lower bound on the decoded quantity.
    #[serde(default)]
    pub min_quantity: f64,

    /// Exclusive upper bound on the decoded quantity; `None` = unbounded.
    #[serde(default)]
    pub max_quantity: Option<f64>,
}

fn default_digits_only() -> bool {
    true
}

fn default_divisor() -> u32 {
    GRAMS_PER_KG
}

impl BarcodeFormat {
    /// Creates a digits-only format with gram quantities and no upper bound.
    ///
    /// Use [`with_prefix`](Self::with_prefix) and
    /// [`with_max_quantity`](Self::with_max_quantity) to tighten it.
    pub fn new(
        name: impl Into<String>,
        total_length: usize,
        code: Range<usize>,
        quantity: Range<usize>,
    ) -> Self {
        BarcodeFormat {
            name: name.into(),
            total_length,
            digits_only: true,
            prefix: None,
            code,
            quantity,
            divisor: GRAMS_PER_KG,
            min_quantity: 0.0,
            max_quantity: None,
        }
    }

    /// Requires the scan to start with the given character.
    pub fn with_prefix(mut self, prefix: char) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Sets an exclusive upper bound on the decoded quantity.
    pub fn with_max_quantity(mut self, max: f64) -> Self {
        self.max_quantity = Some(max);
        self
    }

    /// Checks the descriptor invariants.
    ///
    /// Called by [`FormatTable::register`]; exposed so config loading can
    /// report a bad `scanner.toml` entry before the table is touched.
    pub fn validate(&self) -> FormatResult<()> {
        for range in [&self.code, &self.quantity] {
            if range.start >= range.end {
                return Err(FormatError::EmptyRange {
                    name: self.name.clone(),
                    start: range.start,
                    end: range.end,
                });
            }
            if range.end > self.total_length {
                return Err(FormatError::RangeOutOfBounds {
                    name: self.name.clone(),
                    start: range.start,
                    end: range.end,
                    total_length: self.total_length,
                });
            }
        }

        if self.code.start < self.quantity.end && self.quantity.start < self.code.end {
            return Err(FormatError::OverlappingRanges {
                name: self.name.clone(),
            });
        }

        if self.divisor == 0 {
            return Err(FormatError::ZeroDivisor {
                name: self.name.clone(),
            });
        }

        if let Some(max) = self.max_quantity {
            if self.min_quantity >= max {
                return Err(FormatError::EmptyBounds {
                    name: self.name.clone(),
                    min: self.min_quantity,
                    max,
                });
            }
        }

        Ok(())
    }

    /// Structural match: length, digit validity, and prefix constraint.
    ///
    /// Bounds on the decoded quantity are NOT checked here - a format can
    /// match structurally and still be skipped when its quantity falls
    /// outside bounds (see [`Decoder::decode_scale`](crate::decode::Decoder)).
    pub fn matches(&self, raw: &str) -> bool {
        if raw.len() != self.total_length {
            return false;
        }
        if self.digits_only && !raw.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match self.prefix {
            Some(p) => raw.starts_with(p),
            None => true,
        }
    }

    /// Whether a decoded quantity satisfies this format's exclusive bounds.
    pub fn quantity_in_bounds(&self, quantity: f64) -> bool {
        quantity > self.min_quantity && self.max_quantity.map_or(true, |max| quantity < max)
    }
}

// =============================================================================
// Format Table
// =============================================================================

/// An ordered registry of [`BarcodeFormat`]s.
///
/// ## Ordering
/// Formats are kept length-major (longest first) so the most specific
/// layouts are tried first; formats of equal length keep their
/// registration order. The order is a total order, which makes every
/// decode deterministic - see the priority note in [`crate::format`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatTable {
    formats: Vec<BarcodeFormat>,
}

impl FormatTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        FormatTable {
            formats: Vec::new(),
        }
    }

    /// The table of conventions observed in the field.
    ///
    /// `scale-5x5` is registered ahead of `scale-4x5-padded` (both length
    /// 10): the 5+5 layout is the older in-store convention, and its
    /// bounds failure falls through to the padded 4+5 layout.
    pub fn builtin() -> Self {
        let mut table = FormatTable::new();
        for format in [
            BarcodeFormat::new("ean13-embedded", 13, 2..7, 7..12)
                .with_prefix('2')
                .with_max_quantity(100.0),
            BarcodeFormat::new("scale-5x5", 10, 0..5, 5..10).with_max_quantity(100.0),
            BarcodeFormat::new("scale-4x5-padded", 10, 1..5, 5..10),
            BarcodeFormat::new("scale-4x5", 9, 0..4, 4..9),
        ] {
            table
                .register(format)
                .expect("builtin formats are valid by construction");
        }
        table
    }

    /// Validates and inserts a format at its priority position.
    ///
    /// ## Returns
    /// - `Ok(())` on success
    /// - `Err(FormatError)` if the descriptor is structurally invalid;
    ///   the table is left untouched
    pub fn register(&mut self, format: BarcodeFormat) -> FormatResult<()> {
        format.validate()?;

        // Insert after every format of equal-or-greater length so that
        // registration order breaks ties deterministically.
        let position = self
            .formats
            .iter()
            .position(|f| f.total_length < format.total_length)
            .unwrap_or(self.formats.len());
        self.formats.insert(position, format);
        Ok(())
    }

    /// Formats in priority order.
    pub fn formats(&self) -> &[BarcodeFormat] {
        &self.formats
    }

    /// Number of registered formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Whether the table has no formats at all.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
