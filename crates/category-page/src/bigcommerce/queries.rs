//! GraphQL query and envelope types for the category product lookup.
//!
//! The storefront exposes exactly one query to this component, so the raw
//! serde envelope is used instead of schema codegen. The category URL path
//! and page bound travel as GraphQL variables, never interpolated into the
//! query text.

use serde::{Deserialize, Serialize};

use category_cart_core::{ProductId, VariantId};

use super::types::{CategoryProduct, ProductVariant};
use super::{GraphQLError, GraphQLErrorLocation};

/// Query for the products listed under a category URL path.
pub const CATEGORY_PRODUCTS_QUERY: &str = "\
query CategoryProducts($path: String!, $first: Int!) {
    site {
        route(path: $path) {
            node {
                ... on Category {
                    products(first: $first) {
                        edges {
                            node {
                                entityId
                                name
                                variants {
                                    edges {
                                        node {
                                            entityId
                                            sku
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}";

/// GraphQL request body.
#[derive(Debug, Serialize)]
pub struct GraphQLRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

/// Variables for [`CATEGORY_PRODUCTS_QUERY`].
#[derive(Debug, Serialize)]
pub struct CategoryProductsVariables {
    pub path: String,
    pub first: i64,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

impl From<GraphQLErrorResponse> for GraphQLError {
    fn from(e: GraphQLErrorResponse) -> Self {
        Self {
            message: e.message,
            locations: e
                .locations
                .into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: l.line,
                    column: l.column,
                })
                .collect(),
            path: e.path,
        }
    }
}

// =============================================================================
// Response data shapes
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CategoryProductsData {
    site: SiteData,
}

#[derive(Debug, Deserialize)]
struct SiteData {
    #[serde(default)]
    route: Option<RouteData>,
}

#[derive(Debug, Deserialize)]
struct RouteData {
    #[serde(default)]
    node: Option<NodeData>,
}

#[derive(Debug, Deserialize)]
struct NodeData {
    #[serde(default)]
    products: Option<Connection<ProductNode>>,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    entity_id: i64,
    name: String,
    variants: Connection<VariantNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantNode {
    entity_id: i64,
    sku: String,
}

impl CategoryProductsData {
    /// Flatten the connection nesting into catalog-ordered products.
    ///
    /// A path that resolves to nothing (unknown route, node that is not a
    /// category) yields an empty list; the caller decides what that means.
    #[must_use]
    pub fn into_products(self) -> Vec<CategoryProduct> {
        let Some(products) = self
            .site
            .route
            .and_then(|route| route.node)
            .and_then(|node| node.products)
        else {
            return Vec::new();
        };

        products
            .edges
            .into_iter()
            .map(|edge| CategoryProduct {
                entity_id: ProductId::new(edge.node.entity_id),
                name: edge.node.name,
                variants: edge
                    .node
                    .variants
                    .edges
                    .into_iter()
                    .map(|v| ProductVariant {
                        entity_id: VariantId::new(v.node.entity_id),
                        sku: v.node.sku,
                    })
                    .collect(),
            })
            .collect()
    }
}
