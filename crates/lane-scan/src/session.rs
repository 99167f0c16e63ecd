//! # Scan Session
//!
//! The façade the terminal UI drives. Owns the live input buffer and the
//! pending search results, and performs every externally observable side
//! effect in a fixed order.
//!
//! ## Side-Effect Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Submission Side Effects                              │
//! │                                                                         │
//! │  SUCCESS                              FAILURE                           │
//! │  ───────                              ───────                           │
//! │  1. cart.add(line)                    1. failure notification           │
//! │  2. success notification              2. buffer clear                   │
//! │  3. buffer clear                      3. results clear                  │
//! │  4. results clear                                                       │
//! │  5. focus request                                                       │
//! │                                                                         │
//! │  The order is part of the contract: a concurrent UI render must        │
//! │  never observe a stale buffer alongside a cart that already took       │
//! │  the line.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Submissions
//! `submit` takes `&mut self`, so two interleaved submissions are
//! unrepresentable on a session you own. UIs that share the session use
//! [`SessionHandle`], whose `try_submit` REJECTS an Enter arriving while a
//! resolution is still in flight instead of racing two resolutions
//! against one buffer.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::collaborators::{CartStore, FocusTarget, NoticeKind, NotificationSink, ProductCatalog};
use crate::controller::{ModeController, Resolution};
use crate::error::ScanError;
use lane_core::search::rank_results;
use lane_core::{ProductRef, ResolvedLine, ScanMode};

// =============================================================================
// Submit Outcome
// =============================================================================

/// What one Enter press amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A line reached the cart.
    Added(ResolvedLine),

    /// The scan was rejected; the failure was already notified.
    Rejected(ScanError),

    /// Free-text search ran; this many ranked results are held.
    Searched(usize),

    /// A previous submission is still resolving; nothing was done.
    Busy,
}

// =============================================================================
// Scan Session
// =============================================================================

/// One terminal's scan state: buffer, mode, results, and the collaborator
/// hand-offs.
///
/// Single logical actor: all operations run sequentially in response to
/// discrete input events. The only suspend points are the catalog search
/// and the cart add; dropping an in-flight `submit` future cancels at one
/// of those points and never mutates the cart afterwards.
pub struct ScanSession<C, K, N, F> {
    controller: ModeController<C>,
    cart: K,
    notices: N,
    focus: F,
    buffer: String,
    results: Vec<ProductRef>,
}

impl<C, K, N, F> ScanSession<C, K, N, F>
where
    C: ProductCatalog,
    K: CartStore,
    N: NotificationSink,
    F: FocusTarget,
{
    /// Creates an idle session in FREE_TEXT mode with an empty buffer.
    pub fn new(controller: ModeController<C>, cart: K, notices: N, focus: F) -> Self {
        ScanSession {
            controller,
            cart,
            notices,
            focus,
            buffer: String::new(),
            results: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Read accessors (for rendering)
    // -------------------------------------------------------------------------

    /// The active scan mode.
    pub fn mode(&self) -> ScanMode {
        self.controller.mode()
    }

    /// The live input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The pending free-text results, ranked.
    pub fn results(&self) -> &[ProductRef] {
        &self.results
    }

    // -------------------------------------------------------------------------
    // Mode toggles
    // -------------------------------------------------------------------------

    /// Toggles barcode mode. Clears the buffer and pending results, tells
    /// the operator, and refocuses the input.
    pub fn toggle_barcode(&mut self) -> ScanMode {
        let mode = self.controller.toggle_barcode();
        self.reset_input();
        let message = match mode {
            ScanMode::Barcode => "Barcode mode enabled - scan product and press Enter",
            _ => "Barcode mode disabled",
        };
        self.notices.notify(NoticeKind::Success, message);
        self.focus.request_focus();
        mode
    }

    /// Toggles scale mode; mutually exclusive with barcode mode.
    pub fn toggle_scale(&mut self) -> ScanMode {
        let mode = self.controller.toggle_scale();
        self.reset_input();
        let message = match mode {
            ScanMode::Scale => "Scale mode enabled - scan scale barcode and press Enter",
            _ => "Scale mode disabled",
        };
        self.notices.notify(NoticeKind::Success, message);
        self.focus.request_focus();
        mode
    }

    // -------------------------------------------------------------------------
    // Character input
    // -------------------------------------------------------------------------

    /// Feeds one typed (or wedge-emitted) character into the buffer.
    ///
    /// A letter while a scanner mode is active triggers the auto-exit
    /// rule: the mode drops to FREE_TEXT, the buffer is cleared, and the
    /// operator is told - the letter itself is discarded, since it was
    /// never scanner output.
    pub fn on_character_typed(&mut self, ch: char) {
        if self.controller.on_character_typed(ch) {
            self.reset_input();
            self.notices.notify(
                NoticeKind::Success,
                "Scanner mode disabled - typing detected, switched to search",
            );
            return;
        }
        self.buffer.push(ch);
    }

    /// Clears the buffer and pending results (the search field's Clear
    /// button). Mode is untouched.
    pub fn clear_input(&mut self) {
        self.reset_input();
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Handles the line-terminator key for the current buffer.
    ///
    /// In BARCODE or SCALE mode this resolves the scan and drives the
    /// side-effect sequence documented on this module; in FREE_TEXT mode
    /// it delegates to the catalog search and holds the ranked results
    /// for rendering.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.mode() {
            ScanMode::FreeText => self.refresh_results().await,
            ScanMode::Barcode | ScanMode::Scale => self.submit_scan().await,
        }
    }

    async fn submit_scan(&mut self) -> SubmitOutcome {
        match self.controller.handle_submit(&self.buffer).await {
            Ok(resolution) => {
                if let Err(err) = self.cart.add(resolution.line.clone()).await {
                    return self.reject(err.into());
                }
                self.notices
                    .notify(NoticeKind::Success, &success_message(&resolution));
                self.reset_input();
                self.focus.request_focus();
                SubmitOutcome::Added(resolution.line)
            }
            Err(err) => self.reject(err),
        }
    }

    /// Runs the free-text search for the current buffer and stores the
    /// ranked results.
    ///
    /// A search failure is notified but keeps the buffer: the operator's
    /// typed query is still worth retrying, unlike a consumed scan.
    pub async fn refresh_results(&mut self) -> SubmitOutcome {
        let term = self.buffer.trim().to_string();
        if term.is_empty() {
            self.results.clear();
            return SubmitOutcome::Searched(0);
        }

        match self.controller.resolver().search(&term).await {
            Ok(candidates) => {
                self.results = rank_results(candidates, &term);
                debug!(term = %term, hits = self.results.len(), "free-text search");
                SubmitOutcome::Searched(self.results.len())
            }
            Err(err) => {
                let err = ScanError::from(err);
                self.notices.notify(NoticeKind::Failure, &err.to_string());
                SubmitOutcome::Rejected(err)
            }
        }
    }

    /// Failure path: notification, then buffer clear, then results clear.
    fn reject(&mut self, err: ScanError) -> SubmitOutcome {
        self.notices.notify(NoticeKind::Failure, &err.to_string());
        self.reset_input();
        SubmitOutcome::Rejected(err)
    }

    fn reset_input(&mut self) {
        self.buffer.clear();
        self.results.clear();
    }
}

fn success_message(resolution: &Resolution) -> String {
    if resolution.line.is_weighted_item {
        format!(
            "{} ({:.3} kg) added to cart",
            resolution.product.name, resolution.line.quantity
        )
    } else {
        format!("{} (1 unit) added to cart", resolution.product.name)
    }
}

// =============================================================================
// Session Handle
// =============================================================================

/// Shared session state for UIs whose event handlers run concurrently.
///
/// ## Thread Safety
/// Uses `Arc<tokio::sync::Mutex<ScanSession>>`:
/// - `Arc`: shared ownership across event handlers
/// - `Mutex`: at most one submission in flight per session
///
/// `try_submit` uses `try_lock`, so an Enter that lands while a
/// resolution is pending is rejected with [`SubmitOutcome::Busy`] rather
/// than queued behind the lock - a wedge repeating Enter must not stack
/// stale resolutions against one buffer.
pub struct SessionHandle<C, K, N, F> {
    inner: Arc<Mutex<ScanSession<C, K, N, F>>>,
}

impl<C, K, N, F> SessionHandle<C, K, N, F>
where
    C: ProductCatalog,
    K: CartStore,
    N: NotificationSink,
    F: FocusTarget,
{
    /// Wraps a session for shared use.
    pub fn new(session: ScanSession<C, K, N, F>) -> Self {
        SessionHandle {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Exclusive access to the session (toggles, typing, rendering reads).
    pub async fn session(&self) -> MutexGuard<'_, ScanSession<C, K, N, F>> {
        self.inner.lock().await
    }

    /// Submits the current buffer unless a submission is already in
    /// flight.
    pub async fn try_submit(&self) -> SubmitOutcome {
        match self.inner.try_lock() {
            Ok(mut session) => session.submit().await,
            Err(_) => {
                debug!("submit rejected: a resolution is already in flight");
                SubmitOutcome::Busy
            }
        }
    }
}

impl<C, K, N, F> Clone for SessionHandle<C, K, N, F> {
    fn clone(&self) -> Self {
        SessionHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::ProductCatalog;
    use crate::error::CollaboratorError;
    use crate::resolver::Resolver;
    use lane_core::{Decoder, FormatTable, StoreId};
    use std::sync::Mutex as StdMutex;

    /// Shared call journal so ordering across collaborators is checkable.
    #[derive(Clone, Default)]
    struct Journal(Arc<StdMutex<Vec<String>>>);

    impl Journal {
        fn push(&self, entry: impl Into<String>) {
            self.0.lock().unwrap().push(entry.into());
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct MockCatalog {
        journal: Journal,
        products: Vec<ProductRef>,
        fail: bool,
    }

    impl ProductCatalog for MockCatalog {
        async fn search(
            &self,
            query: &str,
            _scope: &StoreId,
        ) -> Result<Vec<ProductRef>, CollaboratorError> {
            self.journal.push(format!("catalog.search({query})"));
            if self.fail {
                return Err(CollaboratorError::catalog("search service down"));
            }
            Ok(self.products.clone())
        }
    }

    struct MockCart {
        journal: Journal,
        fail: bool,
    }

    impl CartStore for MockCart {
        async fn add(&self, line: ResolvedLine) -> Result<(), CollaboratorError> {
            self.journal.push(format!(
                "cart.add({}, {:?}, {})",
                line.product_id, line.quantity, line.is_weighted_item
            ));
            if self.fail {
                return Err(CollaboratorError::cart("cart service down"));
            }
            Ok(())
        }
    }

    struct MockNotices {
        journal: Journal,
    }

    impl NotificationSink for MockNotices {
        fn notify(&self, kind: NoticeKind, message: &str) {
            let kind = match kind {
                NoticeKind::Success => "success",
                NoticeKind::Failure => "failure",
            };
            self.journal.push(format!("notify.{kind}({message})"));
        }
    }

    struct MockFocus {
        journal: Journal,
    }

    impl FocusTarget for MockFocus {
        fn request_focus(&self) {
            self.journal.push("focus");
        }
    }

    type TestSession = ScanSession<MockCatalog, MockCart, MockNotices, MockFocus>;

    fn product(id: &str, sku: &str, name: &str) -> ProductRef {
        ProductRef {
            id: id.to_string(),
            sku: sku.to_string(),
            barcode: None,
            name: name.to_string(),
        }
    }

    fn session(products: Vec<ProductRef>) -> (TestSession, Journal) {
        session_with(products, false, false)
    }

    fn session_with(
        products: Vec<ProductRef>,
        catalog_fails: bool,
        cart_fails: bool,
    ) -> (TestSession, Journal) {
        let journal = Journal::default();
        let controller = ModeController::new(
            Decoder::new(FormatTable::builtin()),
            Resolver::new(
                MockCatalog {
                    journal: journal.clone(),
                    products,
                    fail: catalog_fails,
                },
                StoreId::default(),
            ),
        );
        let session = ScanSession::new(
            controller,
            MockCart {
                journal: journal.clone(),
                fail: cart_fails,
            },
            MockNotices {
                journal: journal.clone(),
            },
            MockFocus {
                journal: journal.clone(),
            },
        );
        (session, journal)
    }

    fn type_line(session: &mut TestSession, line: &str) {
        for ch in line.chars() {
            session.on_character_typed(ch);
        }
    }

    #[tokio::test]
    async fn test_scale_fallback_scan_reaches_cart_in_order() {
        // 10-digit scale label in BARCODE mode: no direct match, but the
        // embedded 5-digit code resolves.
        let (mut s, journal) = session(vec![product("p1", "12345", "Bananas")]);
        s.toggle_barcode();
        type_line(&mut s, "1234512000");

        let outcome = s.submit().await;

        assert_eq!(outcome, SubmitOutcome::Added(ResolvedLine::weighed("p1", 12.0)));
        assert_eq!(s.buffer(), "");
        assert_eq!(s.mode(), ScanMode::Barcode); // mode persists
        assert_eq!(
            journal.entries(),
            vec![
                "notify.success(Barcode mode enabled - scan product and press Enter)",
                "focus",
                "catalog.search(1234512000)", // direct-exact attempt
                "catalog.search(12345)",      // scale-code resolution
                "cart.add(p1, 12.0, true)",
                "notify.success(Bananas (12.000 kg) added to cart)",
                "focus",
            ]
        );
    }

    #[tokio::test]
    async fn test_direct_match_adds_one_unit() {
        let (mut s, journal) = session(vec![product("p1", "5449000000996", "Coca-Cola")]);
        s.toggle_barcode();
        type_line(&mut s, "5449000000996");

        let outcome = s.submit().await;

        assert_eq!(outcome, SubmitOutcome::Added(ResolvedLine::unit("p1")));
        assert!(journal
            .entries()
            .contains(&"notify.success(Coca-Cola (1 unit) added to cart)".to_string()));
        assert!(journal
            .entries()
            .contains(&"cart.add(p1, 1.0, false)".to_string()));
    }

    #[tokio::test]
    async fn test_empty_submit_makes_no_catalog_or_cart_calls() {
        let (mut s, journal) = session(vec![product("p1", "12345", "Bananas")]);
        s.toggle_barcode();
        let before = journal.entries().len(); // toggle notice + focus

        let outcome = s.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(ScanError::MalformedScan { .. })));
        let after: Vec<String> = journal.entries().split_off(before);
        assert_eq!(after, vec!["notify.failure(invalid scale barcode: \"\")"]);
    }

    #[tokio::test]
    async fn test_scale_mode_rejects_non_label_without_catalog_call() {
        let (mut s, journal) = session(vec![product("p1", "12345", "Bananas")]);
        s.toggle_scale();
        type_line(&mut s, "5449000000996"); // 13 digits, wrong prefix
        let before = journal.entries().len();

        let outcome = s.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Rejected(ScanError::MalformedScan { .. })));
        let after: Vec<String> = journal.entries().split_off(before);
        // Failure notification only - SCALE mode never tries a direct match
        assert_eq!(
            after,
            vec!["notify.failure(invalid scale barcode: \"5449000000996\")"]
        );
        assert_eq!(s.buffer(), "");
        assert_eq!(s.mode(), ScanMode::Scale);
    }

    #[tokio::test]
    async fn test_unresolvable_code_notifies_not_found() {
        let (mut s, journal) = session(vec![]);
        s.toggle_scale();
        type_line(&mut s, "1234512000");

        let outcome = s.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ScanError::ProductNotFound {
                code: "12345".to_string()
            })
        );
        assert!(journal
            .entries()
            .contains(&"notify.failure(no product found with code: 12345)".to_string()));
    }

    #[tokio::test]
    async fn test_cart_failure_is_notified_and_session_survives() {
        let (mut s, journal) = session_with(vec![product("p1", "12345", "Bananas")], false, true);
        s.toggle_scale();
        type_line(&mut s, "1234512000");

        let outcome = s.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ScanError::Collaborator(CollaboratorError::cart(
                "cart service down"
            )))
        );
        assert!(journal
            .entries()
            .contains(&"notify.failure(cart unavailable: cart service down)".to_string()));
        // Buffer cleared, mode unchanged: immediately scannable again
        assert_eq!(s.buffer(), "");
        assert_eq!(s.mode(), ScanMode::Scale);
    }

    #[tokio::test]
    async fn test_catalog_failure_is_notified() {
        let (mut s, journal) = session_with(vec![], true, false);
        s.toggle_barcode();
        type_line(&mut s, "5449000000996");

        let outcome = s.submit().await;

        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected(ScanError::Collaborator(_))
        ));
        assert!(journal
            .entries()
            .contains(&"notify.failure(catalog unavailable: search service down)".to_string()));
    }

    #[tokio::test]
    async fn test_letter_auto_exits_and_clears_buffer() {
        let (mut s, journal) = session(vec![]);
        s.toggle_barcode();
        s.on_character_typed('1');
        s.on_character_typed('a');

        assert_eq!(s.mode(), ScanMode::FreeText);
        assert_eq!(s.buffer(), "");
        assert!(journal.entries().contains(
            &"notify.success(Scanner mode disabled - typing detected, switched to search)"
                .to_string()
        ));
    }

    #[tokio::test]
    async fn test_digit_never_exits_scanner_mode() {
        let (mut s, _) = session(vec![]);
        s.toggle_scale();
        s.on_character_typed('5');

        assert_eq!(s.mode(), ScanMode::Scale);
        assert_eq!(s.buffer(), "5");
    }

    #[tokio::test]
    async fn test_toggles_are_mutually_exclusive_and_clear_input() {
        let (mut s, _) = session(vec![]);
        s.toggle_barcode();
        type_line(&mut s, "123");

        assert_eq!(s.toggle_scale(), ScanMode::Scale);
        assert_eq!(s.buffer(), "");

        assert_eq!(s.toggle_scale(), ScanMode::FreeText);
    }

    #[tokio::test]
    async fn test_free_text_submit_ranks_results() {
        let (mut s, _) = session(vec![
            product("p1", "COKE-330", "Coca-Cola 330ml"),
            product("p2", "DIET-330", "Diet Coke"),
            product("p3", "WATER-1L", "coconut water"),
        ]);
        type_line(&mut s, "coc");

        let outcome = s.submit().await;

        assert_eq!(outcome, SubmitOutcome::Searched(2));
        let names: Vec<&str> = s.results().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Coca-Cola 330ml", "coconut water"]);
        assert_eq!(s.buffer(), "coc"); // free text keeps the query
    }

    #[tokio::test]
    async fn test_try_submit_rejects_while_locked() {
        let (s, journal) = session(vec![]);
        let handle = SessionHandle::new(s);

        let guard = handle.session().await; // a resolution "in flight"
        let before = journal.entries().len();

        assert_eq!(handle.try_submit().await, SubmitOutcome::Busy);
        assert_eq!(journal.entries().len(), before); // zero collaborator calls
        drop(guard);

        // Lock released: submission proceeds normally
        assert_eq!(handle.try_submit().await, SubmitOutcome::Searched(0));
    }
}
