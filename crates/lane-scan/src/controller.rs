//! # Mode Controller
//!
//! Owns the scan mode and routes a terminated input line to the correct
//! decode path.
//!
//! ## Submit Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    handle_submit(buffer)                                │
//! │                                                                         │
//! │  empty buffer ───────────────────────────────► MalformedScan           │
//! │                                                                         │
//! │  BARCODE mode                                                           │
//! │  ─────────────                                                          │
//! │  resolve_exact(decode_exact(buffer))                                    │
//! │       │ hit ──────────────────────────────────► line: 1 unit           │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  decode_scale(buffer)                                                   │
//! │       │ Scale ──► resolve_exact(product_code)                           │
//! │       │               │ hit ──────────────────► line: weighed          │
//! │       │               │ miss ─────────────────► ProductNotFound        │
//! │       │ Unrecognized ─────────────────────────► ProductNotFound        │
//! │                                                                         │
//! │  SCALE mode (no direct-exact attempt, no fallback)                      │
//! │  ──────────                                                             │
//! │  decode_scale(buffer)                                                   │
//! │       │ Scale ──► resolve_exact(product_code) ► weighed / NotFound     │
//! │       │ Unrecognized ─────────────────────────► MalformedScan          │
//! │                                                                         │
//! │  The mode itself persists across submissions; only toggles and the     │
//! │  letter auto-exit ever change it.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::collaborators::ProductCatalog;
use crate::error::{ScanError, ScanResult};
use crate::resolver::Resolver;
use lane_core::{DecodedScan, Decoder, ProductRef, ResolvedLine, ScanMode};

// =============================================================================
// Resolution
// =============================================================================

/// A fully-resolved submission: how the scan was read, which product it
/// matched, and the line to forward to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// How the scan was interpreted (exact candidate vs scale label).
    pub scan: DecodedScan,

    /// The exactly-matched catalog product.
    pub product: ProductRef,

    /// The cart line derived from scan and product.
    pub line: ResolvedLine,
}

// =============================================================================
// Mode Controller
// =============================================================================

/// The three-state scan mode plus the decode/resolve pipeline behind it.
pub struct ModeController<C> {
    mode: ScanMode,
    decoder: Decoder,
    resolver: Resolver<C>,
}

impl<C: ProductCatalog> ModeController<C> {
    /// Creates a controller starting in FREE_TEXT.
    pub fn new(decoder: Decoder, resolver: Resolver<C>) -> Self {
        ModeController {
            mode: ScanMode::default(),
            decoder,
            resolver,
        }
    }

    /// The active mode.
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// The resolver, for the free-text search path.
    pub fn resolver(&self) -> &Resolver<C> {
        &self.resolver
    }

    /// Toggles barcode mode; returns the new mode.
    pub fn toggle_barcode(&mut self) -> ScanMode {
        self.mode = self.mode.toggle_barcode();
        info!(mode = %self.mode, "barcode toggle");
        self.mode
    }

    /// Toggles scale mode; returns the new mode.
    pub fn toggle_scale(&mut self) -> ScanMode {
        self.mode = self.mode.toggle_scale();
        info!(mode = %self.mode, "scale toggle");
        self.mode
    }

    /// Applies the letter auto-exit rule to a typed character.
    ///
    /// ## Returns
    /// `true` when a scanner mode was force-exited (the session emits the
    /// "scanner mode disabled" notification on that signal).
    pub fn on_character_typed(&mut self, ch: char) -> bool {
        let next = self.mode.after_char(ch);
        if next == self.mode {
            return false;
        }
        info!(from = %self.mode, "typing detected, scanner mode disabled");
        self.mode = next;
        true
    }

    /// Resolves a terminated input line according to the active mode.
    ///
    /// Pure routing plus at most two suspending resolver calls; every
    /// buffer/notification side effect belongs to the session.
    pub async fn handle_submit(&self, buffer: &str) -> ScanResult<Resolution> {
        let candidate = self.decoder.decode_exact(buffer);
        if candidate.is_empty() {
            return Err(ScanError::MalformedScan {
                raw: String::new(),
            });
        }

        debug!(mode = %self.mode, scan = %candidate, "submit");

        match self.mode {
            ScanMode::Barcode => {
                if let Some(product) = self.resolver.resolve_exact(candidate).await? {
                    let line = ResolvedLine::unit(&product.id);
                    return Ok(Resolution {
                        scan: DecodedScan::Exact {
                            code: candidate.to_string(),
                        },
                        product,
                        line,
                    });
                }

                match self.decoder.decode_scale(candidate) {
                    DecodedScan::Scale {
                        product_code,
                        quantity,
                    } => self.resolve_scale(product_code, quantity).await,
                    _ => Err(ScanError::ProductNotFound {
                        code: candidate.to_string(),
                    }),
                }
            }

            ScanMode::Scale => match self.decoder.decode_scale(candidate) {
                DecodedScan::Scale {
                    product_code,
                    quantity,
                } => self.resolve_scale(product_code, quantity).await,
                _ => Err(ScanError::MalformedScan {
                    raw: candidate.to_string(),
                }),
            },

            // Free-text lines are search queries, not scans; the session
            // routes them before this method is ever reached.
            ScanMode::FreeText => Err(ScanError::MalformedScan {
                raw: candidate.to_string(),
            }),
        }
    }

    async fn resolve_scale(&self, product_code: String, quantity: f64) -> ScanResult<Resolution> {
        match self.resolver.resolve_exact(&product_code).await? {
            Some(product) => {
                let line = ResolvedLine::weighed(&product.id, quantity);
                Ok(Resolution {
                    scan: DecodedScan::Scale {
                        product_code,
                        quantity,
                    },
                    product,
                    line,
                })
            }
            None => Err(ScanError::ProductNotFound {
                code: product_code,
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
