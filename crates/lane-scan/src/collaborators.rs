//! # Collaborator Contracts
//!
//! The trait seams between the scan engine and the systems it drives.
//!
//! ## Collaborator Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan Engine Collaborators                            │
//! │                                                                         │
//! │                 ┌───────────────────────────┐                           │
//! │   search ──────►│ ProductCatalog            │ fuzzy/substring search,  │
//! │   (suspends)    │ (catalog service)         │ ordering unspecified     │
//! │                 └───────────────────────────┘                           │
//! │                 ┌───────────────────────────┐                           │
//! │   add ─────────►│ CartStore                 │ NOT idempotent - called  │
//! │   (suspends)    │ (cart service)            │ at most once per scan    │
//! │                 └───────────────────────────┘                           │
//! │                 ┌───────────────────────────┐                           │
//! │   notify ──────►│ NotificationSink          │ operator toasts          │
//! │   (sync)        │ (UI surface)              │                           │
//! │                 └───────────────────────────┘                           │
//! │                 ┌───────────────────────────┐                           │
//! │   request_focus►│ FocusTarget               │ puts the caret back in   │
//! │   (sync)        │ (search input)            │ the search field         │
//! │                 └───────────────────────────┘                           │
//! │                                                                         │
//! │  Only the catalog and cart calls may suspend. Everything else is       │
//! │  synchronous so side-effect ordering stays observable.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations live in the embedding application; the test suite uses
//! hand-rolled mocks with call journals.

use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use lane_core::{ProductRef, ResolvedLine, StoreId};

// =============================================================================
// Notification Kind
// =============================================================================

/// Whether a notification reports a completed add or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    /// The scan resolved and the cart was updated (also used for mode
    /// toggles, which are not failures).
    Success,

    /// The scan was rejected; nothing reached the cart.
    Failure,
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// The product catalog/search service.
///
/// `search` is a best-effort fuzzy/substring match scoped to one store:
/// result ordering is unspecified, the result may be empty, and the call
/// may fail transiently. Exactness is the [`Resolver`](crate::resolver::Resolver)'s
/// job, never the catalog's.
#[allow(async_fn_in_trait)] // sessions are generic over their collaborators, never boxed
pub trait ProductCatalog {
    /// Searches the catalog for candidates matching `query`.
    async fn search(
        &self,
        query: &str,
        scope: &StoreId,
    ) -> Result<Vec<ProductRef>, CollaboratorError>;
}

/// The cart mutation service.
///
/// `add` is NOT assumed idempotent; the session calls it at most once per
/// successful resolution, and a cancelled submission never reaches it.
#[allow(async_fn_in_trait)] // sessions are generic over their collaborators, never boxed
pub trait CartStore {
    /// Adds a resolved line to the live sale.
    ///
    /// Takes the line by value: a [`ResolvedLine`] has no life beyond this
    /// hand-off.
    async fn add(&self, line: ResolvedLine) -> Result<(), CollaboratorError>;
}

/// The operator-facing notification surface.
pub trait NotificationSink {
    /// Surfaces a success or failure message to the operator.
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// The input field that should regain the caret after a completed scan
/// or a mode toggle, so the next wedge burst lands in the buffer.
pub trait FocusTarget {
    /// Requests focus on the scan input.
    fn request_focus(&self);
}
