//! Storefront API client for the category page.
//!
//! # Architecture
//!
//! - One GraphQL query (`CategoryProducts`) against `POST {base}/graphql`,
//!   authorized with a bearer token, decoded through a raw serde envelope
//! - REST cart endpoints under `{base}/api/storefront/` for lookup, create,
//!   append and delete
//! - No caching: the cart is mutable server-side state and its id is
//!   re-fetched on every operation
//!
//! # Example
//!
//! ```rust,ignore
//! use category_cart_page::bigcommerce::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config)?;
//!
//! let products = client.category_products("/garden/", 50).await?;
//! let cart = client.create_cart(&line_items).await?;
//! ```

mod client;
pub mod queries;
pub mod types;

pub use client::StorefrontClient;
pub use types::*;

use thiserror::Error;

use category_cart_core::ProductId;

/// Errors that can occur when interacting with the storefront API.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// Response body did not decode into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The category query resolved but carried no products.
    #[error("Category has no products: {0}")]
    EmptyCategory(String),

    /// The cart lookup found no active cart.
    #[error("No active cart")]
    NoActiveCart,

    /// A catalog product came back without any variant to default to.
    #[error("Product {0} has no variants")]
    MalformedProduct(ProductId),
}

/// A GraphQL error returned by the storefront API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            // Include message if present
            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            // Include path if present
            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            // Include location if present
            if !e.locations.is_empty() {
                let loc = &e.locations[0];
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_error_display() {
        let err = StorefrontError::EmptyCategory("/garden/".to_string());
        assert_eq!(err.to_string(), "Category has no products: /garden/");

        let err = StorefrontError::MalformedProduct(ProductId::new(7));
        assert_eq!(err.to_string(), "Product 7 has no variants");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid path".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = StorefrontError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid path"
        );
    }

    #[test]
    fn test_graphql_error_empty_messages() {
        // Empty message but with path and location info
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("site".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = StorefrontError::GraphQL(errors);
        assert_eq!(err.to_string(), "GraphQL errors: path: site.0 at line 5:10");
    }

    #[test]
    fn test_graphql_error_no_details() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }];
        let err = StorefrontError::GraphQL(errors);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = StorefrontError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }
}
