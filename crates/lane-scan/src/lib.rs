//! # lane-scan: Scan Session Layer for Lane POS
//!
//! Everything between raw character events and the external
//! collaborators: the mode controller, the exact-match resolver, and the
//! [`ScanSession`] façade the terminal UI drives.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Scan, End to End                                 │
//! │                                                                         │
//! │  keystrokes ──► ScanSession buffer                                      │
//! │                      │ Enter                                            │
//! │                      ▼                                                  │
//! │               ModeController.handle_submit(buffer)                      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               Decoder (lane-core) ──► Resolver ──► ProductCatalog      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               CartStore.add(line)  or  failure notification            │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │               buffer clear ──► focus request                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`collaborators`] - Trait seams for catalog, cart, notifications, focus
//! - [`resolver`] - Fuzzy search + exact post-filter
//! - [`controller`] - Mode ownership and submit routing
//! - [`session`] - The façade: buffer, side-effect ordering, shared handle
//! - [`config`] - `scanner.toml` loading (store id, extra formats)
//! - [`error`] - The session error taxonomy
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use lane_core::{Decoder, FormatTable, StoreId};
//! use lane_scan::{ModeController, Resolver, ScanSession, SessionHandle};
//!
//! let config = lane_scan::ScannerConfig::load(&path)?;
//! let decoder = Decoder::new(config.format_table()?);
//! let resolver = Resolver::new(catalog_client, config.store_id.clone());
//! let session = ScanSession::new(
//!     ModeController::new(decoder, resolver),
//!     cart_client,
//!     toast_sink,
//!     search_input,
//! );
//! let handle = SessionHandle::new(session);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod error;
pub mod resolver;
pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use collaborators::{CartStore, FocusTarget, NoticeKind, NotificationSink, ProductCatalog};
pub use config::ScannerConfig;
pub use controller::{ModeController, Resolution};
pub use error::{CollaboratorError, ConfigError, ScanError, ScanResult};
pub use resolver::Resolver;
pub use session::{ScanSession, SessionHandle, SubmitOutcome};
