//! On-page widget state and the seams the controller signals through.
//!
//! The controller owns a [`UiState`] snapshot of the two bulk-operation
//! buttons and the cart counter; everything that leaves the component (the
//! cart-quantity event other widgets listen for, toast notifications,
//! screen-reader announcements) goes through small injected traits so the
//! workflows can run without a real page behind them.

use serde::Serialize;

// =============================================================================
// Button / counter state
// =============================================================================

/// Label and enablement of one of the bulk-operation buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
}

impl ButtonState {
    /// An enabled button carrying its idle label.
    #[must_use]
    pub fn idle(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }
}

/// Idle and busy labels for both buttons, as rendered into the page.
#[derive(Debug, Clone)]
pub struct ButtonLabels {
    pub add_idle: String,
    pub add_busy: String,
    pub remove_idle: String,
    pub remove_busy: String,
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self {
            add_idle: "Add All To Cart".to_string(),
            add_busy: "Adding all items to cart...".to_string(),
            remove_idle: "Remove All Items".to_string(),
            remove_busy: "Removing all items...".to_string(),
        }
    }
}

/// Widget state owned by the controller.
///
/// Mutated only by the two workflows' completion handlers; no other writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Add-all-to-cart button.
    pub add_button: ButtonState,
    /// Remove-all-items button. Starts disabled until the cart has items;
    /// the page hides the control entirely while [`UiState::has_items`]
    /// is false.
    pub remove_button: ButtonState,
    /// Total quantity shown on the cart counter badge.
    pub cart_count: u32,
}

impl UiState {
    /// Initial state for a page with an empty cart.
    #[must_use]
    pub fn new(labels: &ButtonLabels) -> Self {
        Self {
            add_button: ButtonState::idle(labels.add_idle.clone()),
            remove_button: ButtonState {
                label: labels.remove_idle.clone(),
                enabled: false,
            },
            cart_count: 0,
        }
    }

    /// Whether the counter badge should render in its "has items" style.
    #[must_use]
    pub const fn has_items(&self) -> bool {
        self.cart_count > 0
    }
}

// =============================================================================
// Outward signals
// =============================================================================

/// Toast notification raised exactly once per completed workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "severity", content = "message")]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Page-side effects the controller triggers but does not own.
///
/// The page wires these to its widgets: `cart_quantity_changed` feeds the
/// header badge and cart preview, `notify` shows the toast.
pub trait CategoryPageHooks: Send + Sync {
    /// The cart's total quantity changed; other on-page widgets re-render.
    fn cart_quantity_changed(&self, total: u32);

    /// Show a success or error toast for a completed workflow.
    fn notify(&self, notification: Notification);
}

// =============================================================================
// Accessibility live region
// =============================================================================

/// How urgently assistive technology should announce an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    /// Announced at the next graceful opportunity.
    Polite,
    /// Interrupts the current announcement.
    Assertive,
}

/// Fire-and-forget screen-reader announcements.
///
/// Collaborator interface only: nothing in the cart workflows depends on a
/// return value from it.
pub trait LiveRegion: Send + Sync {
    fn announce(&self, politeness: Politeness, message: &str);
}

/// Announces sort and filter state changes to the live region.
pub struct SortByBinder<L> {
    live_region: L,
}

impl<L: LiveRegion> SortByBinder<L> {
    #[must_use]
    pub const fn new(live_region: L) -> Self {
        Self { live_region }
    }

    /// A sort order was applied to the product listing.
    pub fn sort_applied(&self, sort_label: &str) {
        self.live_region
            .announce(Politeness::Polite, &format!("Products sorted by {sort_label}"));
    }

    /// A shop-by-price filter was applied.
    pub fn price_filter_applied(&self, message: &str) {
        self.live_region.announce(Politeness::Assertive, message);
    }
}
