//! Line-item construction for the bulk-add workflow.

use category_cart_core::LineItem;

use crate::bigcommerce::{CategoryProduct, StorefrontError};

/// Build the cart submission for a category's product set.
///
/// Exactly one line item per product, quantity 1, defaulting to the
/// product's first variant; order is preserved. Nothing is deduplicated
/// against existing cart contents.
///
/// # Errors
///
/// Returns [`StorefrontError::MalformedProduct`] if any product carries no
/// variants, failing the whole set before a single write is issued.
pub fn build_line_items(products: &[CategoryProduct]) -> Result<Vec<LineItem>, StorefrontError> {
    products
        .iter()
        .map(|product| {
            product
                .default_variant()
                .map(|variant| LineItem::one(product.entity_id, variant.entity_id))
                .ok_or(StorefrontError::MalformedProduct(product.entity_id))
        })
        .collect()
}
