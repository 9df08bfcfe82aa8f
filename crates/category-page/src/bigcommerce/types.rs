//! Domain types for the storefront API.
//!
//! Catalog types are converted out of the raw GraphQL envelope in
//! [`super::queries`]; the cart types deserialize the REST endpoints'
//! payloads directly. Everything is decoded once, here at the boundary.

use serde::{Deserialize, Serialize};

use category_cart_core::{CartId, ProductId, VariantId};

// =============================================================================
// Catalog Types
// =============================================================================

/// A purchasable variant of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductVariant {
    /// Variant entity ID (passed to the cart as `variantId`).
    pub entity_id: VariantId,
    /// Merchant SKU.
    pub sku: String,
}

/// A product as listed on the category page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProduct {
    /// Product entity ID.
    pub entity_id: ProductId,
    /// Display name.
    pub name: String,
    /// Variants in catalog order; the first one is the default.
    pub variants: Vec<ProductVariant>,
}

impl CategoryProduct {
    /// The variant the bulk-add workflow defaults to (catalog order, index 0).
    #[must_use]
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// One element of the cart lookup response.
///
/// `GET /api/storefront/cart` returns an array of these; an empty array
/// means no cart exists yet.
#[derive(Debug, Clone, Deserialize)]
pub struct CartRef {
    /// Opaque cart identifier.
    pub id: CartId,
}

/// A quantity-bearing entry inside one of the cart's line-item groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line identifier assigned by the storefront.
    #[serde(default)]
    pub id: Option<String>,
    /// Product display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Units of this line in the cart.
    pub quantity: u32,
}

/// The cart's line items, grouped by product-line category.
///
/// The storefront keys this map by item kind; groups absent from the
/// payload deserialize as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CartLineGroups {
    pub physical_items: Vec<CartLine>,
    pub digital_items: Vec<CartLine>,
    pub gift_certificates: Vec<CartLine>,
    pub custom_items: Vec<CartLine>,
}

impl CartLineGroups {
    /// Sum of quantities across all groups.
    ///
    /// This is the number the cart counter badge displays.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        [
            &self.physical_items,
            &self.digital_items,
            &self.gift_certificates,
            &self.custom_items,
        ]
        .into_iter()
        .flatten()
        .map(|line| line.quantity)
        .sum()
    }
}

/// Cart contents as returned by the create and append endpoints.
///
/// The `lineItems` field is required: a write response without it is a
/// decode error, not a success (there is no duck-typed probing downstream).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartContents {
    /// Opaque cart identifier.
    pub id: CartId,
    /// Line items grouped by product-line category.
    pub line_items: CartLineGroups,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_variant_is_first() {
        let product = CategoryProduct {
            entity_id: ProductId::new(1),
            name: "Able Brewing System".to_string(),
            variants: vec![
                ProductVariant {
                    entity_id: VariantId::new(10),
                    sku: "ABS".to_string(),
                },
                ProductVariant {
                    entity_id: VariantId::new(11),
                    sku: "ABS-L".to_string(),
                },
            ],
        };
        assert_eq!(
            product.default_variant().unwrap().entity_id,
            VariantId::new(10)
        );
    }

    #[test]
    fn test_default_variant_absent() {
        let product = CategoryProduct {
            entity_id: ProductId::new(2),
            name: "No variants".to_string(),
            variants: vec![],
        };
        assert!(product.default_variant().is_none());
    }

    #[test]
    fn test_cart_lookup_entry_ignores_extra_fields() {
        let entries: Vec<CartRef> = serde_json::from_str(
            r#"[{"id": "abc", "currency": {"code": "USD"}, "lineItems": {}}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id.as_str(), "abc");
    }

    #[test]
    fn test_total_quantity_sums_across_groups() {
        let contents: CartContents = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "lineItems": {
                "physicalItems": [{"quantity": 2}, {"quantity": 1}],
                "digitalItems": [{"quantity": 3}],
                "giftCertificates": [],
                "customItems": [{"quantity": 1}]
            }
        }))
        .unwrap();
        assert_eq!(contents.line_items.total_quantity(), 7);
    }

    #[test]
    fn test_missing_groups_deserialize_empty() {
        let contents: CartContents = serde_json::from_value(serde_json::json!({
            "id": "abc",
            "lineItems": {
                "physicalItems": [{"id": "li-1", "name": "Chair", "quantity": 1}]
            }
        }))
        .unwrap();
        assert_eq!(contents.line_items.total_quantity(), 1);
        assert!(contents.line_items.digital_items.is_empty());
    }

    #[test]
    fn test_write_response_without_line_items_is_a_decode_error() {
        let result: Result<CartContents, _> =
            serde_json::from_value(serde_json::json!({"id": "abc"}));
        assert!(result.is_err());
    }
}
