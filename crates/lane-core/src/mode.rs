//! # Scan Mode
//!
//! The three-state machine deciding how a terminated input line is
//! interpreted.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Scan Mode Transitions                            │
//! │                                                                         │
//! │                      toggle_barcode                                     │
//! │      ┌────────────┐ ───────────────► ┌────────────┐                    │
//! │      │ FREE_TEXT  │                  │  BARCODE   │                    │
//! │      │ (initial)  │ ◄─────────────── │            │                    │
//! │      └────┬───▲───┘  toggle_barcode  └──────▲─────┘                    │
//! │           │   │      / letter typed         │                          │
//! │  toggle_  │   │ toggle_scale                │ toggle_barcode           │
//! │  scale    │   │ / letter typed              │ (mutual exclusion)       │
//! │      ┌────▼───┴───┐ ◄───────────────────────┘                          │
//! │      │   SCALE    │   toggle_scale                                     │
//! │      └────────────┘                                                    │
//! │                                                                         │
//! │  AUTO-EXIT: a letter as input while BARCODE or SCALE is active         │
//! │  force-transitions to FREE_TEXT. Scanner wedges always open with a     │
//! │  digit for this business; a leading letter means a human is typing     │
//! │  a product name and must not need an explicit toggle to do so.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transitions are expressed as methods on the enum (not boolean flags) so
//! exactly one state is ever active and the auto-exit rule is testable
//! without any UI wiring.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The interpretation currently applied to terminated input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ScanMode {
    /// Free-form search input (initial state).
    #[default]
    FreeText,

    /// Input lines are plain product barcodes.
    Barcode,

    /// Input lines are weight-encoded scale barcodes.
    Scale,
}

impl ScanMode {
    /// Toggles barcode scanning: any other state enters BARCODE, and
    /// BARCODE itself toggles back off to FREE_TEXT.
    #[must_use]
    pub fn toggle_barcode(self) -> ScanMode {
        match self {
            ScanMode::Barcode => ScanMode::FreeText,
            ScanMode::FreeText | ScanMode::Scale => ScanMode::Barcode,
        }
    }

    /// Toggles scale scanning; symmetric with [`toggle_barcode`](Self::toggle_barcode)
    /// and mutually exclusive with it.
    #[must_use]
    pub fn toggle_scale(self) -> ScanMode {
        match self {
            ScanMode::Scale => ScanMode::FreeText,
            ScanMode::FreeText | ScanMode::Barcode => ScanMode::Scale,
        }
    }

    /// Applies the auto-exit rule to a typed character.
    ///
    /// A letter while a scanner mode is active forces FREE_TEXT; digits
    /// (and anything else a wedge might emit) never change the mode.
    #[must_use]
    pub fn after_char(self, ch: char) -> ScanMode {
        if self.is_scanning() && ch.is_alphabetic() {
            ScanMode::FreeText
        } else {
            self
        }
    }

    /// Whether a scanner mode (BARCODE or SCALE) is active.
    pub fn is_scanning(&self) -> bool {
        matches!(self, ScanMode::Barcode | ScanMode::Scale)
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::FreeText => write!(f, "free-text"),
            ScanMode::Barcode => write!(f, "barcode"),
            ScanMode::Scale => write!(f, "scale"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
