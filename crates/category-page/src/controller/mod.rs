//! Bulk cart operations for the category page.
//!
//! [`CartBulkOperationsController`] wires the add-all-to-cart and
//! remove-all-items triggers to the storefront API and keeps the on-page
//! widget state consistent through both. The API and the page surface are
//! injected at construction, so the workflows run the same against the real
//! client or an in-memory fake.
//!
//! Each workflow runs at most once at a time: a second trigger while one is
//! outstanding is a no-op. The cart id is never held across operations - it
//! is re-fetched at the start of every workflow.

mod line_items;

pub use line_items::build_line_items;

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::instrument;

use category_cart_core::{CartId, LineItem};

use crate::bigcommerce::{CartContents, CartRef, CategoryProduct, StorefrontError};
use crate::ui::{ButtonLabels, ButtonState, CategoryPageHooks, Notification, UiState};

// =============================================================================
// Storefront seam
// =============================================================================

/// The slice of the storefront API the bulk workflows depend on.
///
/// Implemented by [`crate::bigcommerce::StorefrontClient`]; tests substitute
/// an in-memory fake.
#[async_trait]
pub trait CartStorefront: Send + Sync {
    /// Products listed under a category URL path, bounded to `first`.
    async fn category_products(
        &self,
        path: &str,
        first: i64,
    ) -> Result<Vec<CategoryProduct>, StorefrontError>;

    /// The shopper's current cart, if one exists.
    async fn current_cart(&self) -> Result<Option<CartRef>, StorefrontError>;

    /// Create a cart containing the given line items.
    async fn create_cart(&self, line_items: &[LineItem]) -> Result<CartContents, StorefrontError>;

    /// Append line items to an existing cart.
    async fn add_cart_items(
        &self,
        cart_id: &CartId,
        line_items: &[LineItem],
    ) -> Result<CartContents, StorefrontError>;

    /// Delete a cart; success implies zero items remain.
    async fn delete_cart(&self, cart_id: &CartId) -> Result<(), StorefrontError>;
}

// =============================================================================
// Workflow outcome
// =============================================================================

/// Result of one workflow trigger.
#[derive(Debug)]
pub enum BulkOutcome {
    /// The workflow ran to completion; the counter now shows `cart_count`.
    Completed { cart_count: u32 },
    /// A run of the same workflow was already outstanding; nothing happened.
    SkippedInFlight,
    /// The workflow failed; the button was restored and the counter is
    /// unchanged.
    Failed(StorefrontError),
}

/// Which of the two workflows is completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Workflow {
    Add,
    Remove,
}

// =============================================================================
// In-flight guard
// =============================================================================

/// Scoped hold on a workflow's in-flight flag.
///
/// Released on drop, so the flag clears on success, failure and panic alike.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    /// Acquire the flag, or `None` if a run is already outstanding.
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The category page's bulk add/remove cart controller.
pub struct CartBulkOperationsController<S, H> {
    api: S,
    hooks: H,
    category_path: String,
    page_size: i64,
    labels: ButtonLabels,
    state: Mutex<UiState>,
    add_in_flight: AtomicBool,
    remove_in_flight: AtomicBool,
}

impl<S, H> CartBulkOperationsController<S, H>
where
    S: CartStorefront,
    H: CategoryPageHooks,
{
    /// Create a controller for one category page.
    ///
    /// `category_path` is the category's URL path as rendered into the
    /// add-all button; `page_size` bounds the product query.
    #[must_use]
    pub fn new(api: S, hooks: H, category_path: impl Into<String>, page_size: i64) -> Self {
        Self::with_labels(api, hooks, category_path, page_size, ButtonLabels::default())
    }

    /// Create a controller with the page's own button labels.
    #[must_use]
    pub fn with_labels(
        api: S,
        hooks: H,
        category_path: impl Into<String>,
        page_size: i64,
        labels: ButtonLabels,
    ) -> Self {
        let state = Mutex::new(UiState::new(&labels));
        Self {
            api,
            hooks,
            category_path: category_path.into(),
            page_size,
            labels,
            state,
            add_in_flight: AtomicBool::new(false),
            remove_in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the current widget state.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the state lock panicked.
    #[must_use]
    pub fn ui_state(&self) -> UiState {
        self.state.lock().expect("ui state lock poisoned").clone()
    }

    /// Add every product in the category to the cart.
    ///
    /// Creates a cart when none exists, appends to the existing one
    /// otherwise. A trigger while a previous add is outstanding is a no-op.
    #[instrument(skip(self), fields(category = %self.category_path))]
    pub async fn add_all_to_cart(&self) -> BulkOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.add_in_flight) else {
            tracing::debug!("bulk add already in flight, ignoring trigger");
            return BulkOutcome::SkippedInFlight;
        };

        self.set_busy(Workflow::Add);
        let result = self.run_bulk_add().await;
        self.complete(Workflow::Add, result)
    }

    /// Remove the cart and everything in it.
    ///
    /// A trigger while a previous remove is outstanding is a no-op.
    #[instrument(skip(self), fields(category = %self.category_path))]
    pub async fn remove_all_items(&self) -> BulkOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.remove_in_flight) else {
            tracing::debug!("bulk remove already in flight, ignoring trigger");
            return BulkOutcome::SkippedInFlight;
        };

        self.set_busy(Workflow::Remove);
        let result = self.run_bulk_remove().await;
        self.complete(Workflow::Remove, result)
    }

    async fn run_bulk_add(&self) -> Result<u32, StorefrontError> {
        let products = self
            .api
            .category_products(&self.category_path, self.page_size)
            .await?;

        // An empty product set is indistinguishable from a failed or stale
        // query; it surfaces as an error, never a quiet success.
        if products.is_empty() {
            return Err(StorefrontError::EmptyCategory(self.category_path.clone()));
        }

        let line_items = build_line_items(&products)?;

        let contents = match self.api.current_cart().await? {
            None => self.api.create_cart(&line_items).await?,
            Some(cart) => self.api.add_cart_items(&cart.id, &line_items).await?,
        };

        Ok(contents.line_items.total_quantity())
    }

    async fn run_bulk_remove(&self) -> Result<u32, StorefrontError> {
        let cart = self
            .api
            .current_cart()
            .await?
            .ok_or(StorefrontError::NoActiveCart)?;

        self.api.delete_cart(&cart.id).await?;
        Ok(0)
    }

    /// Switch the triggering button to its busy label, disabled.
    fn set_busy(&self, workflow: Workflow) {
        let mut state = self.state.lock().expect("ui state lock poisoned");
        match workflow {
            Workflow::Add => {
                state.add_button = ButtonState {
                    label: self.labels.add_busy.clone(),
                    enabled: false,
                };
            }
            Workflow::Remove => {
                state.remove_button = ButtonState {
                    label: self.labels.remove_busy.clone(),
                    enabled: false,
                };
            }
        }
    }

    /// The single completion handler for both workflows.
    ///
    /// Runs exactly once per trigger that acquired the guard: restores the
    /// triggering button, updates the counter on success, and raises exactly
    /// one notification.
    fn complete(&self, workflow: Workflow, result: Result<u32, StorefrontError>) -> BulkOutcome {
        match result {
            Ok(total) => {
                {
                    let mut state = self.state.lock().expect("ui state lock poisoned");
                    state.cart_count = total;
                    match workflow {
                        Workflow::Add => {
                            state.add_button = ButtonState::idle(self.labels.add_idle.clone());
                            // The remove-all control becomes available now
                            // that the cart has items.
                            state.remove_button.enabled = total > 0;
                        }
                        Workflow::Remove => {
                            state.remove_button =
                                ButtonState::idle(self.labels.remove_idle.clone());
                        }
                    }
                }

                self.hooks.cart_quantity_changed(total);
                self.hooks.notify(Notification::Success(match workflow {
                    Workflow::Add => {
                        format!("All category products were added to your cart ({total} items)")
                    }
                    Workflow::Remove => "All items were removed from your cart".to_string(),
                }));

                BulkOutcome::Completed { cart_count: total }
            }
            Err(error) => {
                tracing::error!(?workflow, %error, "bulk cart operation failed");

                {
                    let mut state = self.state.lock().expect("ui state lock poisoned");
                    match workflow {
                        Workflow::Add => {
                            state.add_button = ButtonState::idle(self.labels.add_idle.clone());
                        }
                        Workflow::Remove => {
                            state.remove_button =
                                ButtonState::idle(self.labels.remove_idle.clone());
                        }
                    }
                }

                self.hooks.notify(Notification::Error(error.to_string()));
                BulkOutcome::Failed(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_guard_excludes_second_acquire() {
        let flag = AtomicBool::new(false);

        let guard = InFlightGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_in_flight_guard_releases_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = InFlightGuard::acquire(&flag).expect("first acquire");
            assert!(flag.load(Ordering::Acquire));
        }
        assert!(!flag.load(Ordering::Acquire));
    }
}
