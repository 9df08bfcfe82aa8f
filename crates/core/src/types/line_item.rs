//! Cart line item as submitted to the storefront cart API.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};

/// A single product/variant/quantity tuple to be added to a cart.
///
/// Serializes with the camelCase field names the storefront cart endpoints
/// expect (`{"quantity": 1, "productId": 112, "variantId": 10}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Number of units; the bulk-add workflow always submits 1.
    pub quantity: u32,
    /// Catalog product this line refers to.
    pub product_id: ProductId,
    /// Concrete variant of the product.
    pub variant_id: VariantId,
}

impl LineItem {
    /// Create a single-unit line item for a product's variant.
    #[must_use]
    pub const fn one(product_id: ProductId, variant_id: VariantId) -> Self {
        Self {
            quantity: 1,
            product_id,
            variant_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let item = LineItem::one(ProductId::new(112), VariantId::new(77));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"quantity": 1, "productId": 112, "variantId": 77})
        );
    }

    #[test]
    fn test_one_has_quantity_one() {
        let item = LineItem::one(ProductId::new(3), VariantId::new(30));
        assert_eq!(item.quantity, 1);
    }
}
