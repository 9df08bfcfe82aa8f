//! Storefront API client.
//!
//! One GraphQL query for the category's product listing plus the REST cart
//! endpoints. Requests carry a 30 second timeout; there are no retries - a
//! failed round trip surfaces to the workflow as a terminal error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use category_cart_core::{CartId, LineItem};

use crate::config::CategoryPageConfig;
use crate::controller::CartStorefront;

use super::StorefrontError;
use super::queries::{
    CATEGORY_PRODUCTS_QUERY, CategoryProductsData, CategoryProductsVariables, GraphQLRequest,
    GraphQLResponse,
};
use super::types::{CartContents, CartRef, CategoryProduct};

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the storefront GraphQL and cart APIs.
///
/// Cheaply cloneable via `Arc`. Nothing is cached: the cart is mutable
/// server-side state and is re-fetched on every operation.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

/// Request body for the cart create and append endpoints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartWriteBody<'a> {
    line_items: &'a [LineItem],
}

impl StorefrontClient {
    /// Create a new storefront API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &CategoryPageConfig) -> Result<Self, StorefrontError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                bearer_token: config.bearer_token.expose_secret().to_string(),
            }),
        })
    }

    /// Check the status and decode the body, keeping the text around for
    /// error diagnostics.
    async fn decode_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StorefrontError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "storefront API returned non-success status"
            );
            return Err(StorefrontError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to decode storefront API response"
                );
                Err(StorefrontError::Decode(e))
            }
        }
    }

    /// List the products under a category URL path, bounded to `first`.
    ///
    /// An unroutable path and an empty category both come back as an empty
    /// list; the workflow decides what that means.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response does not decode,
    /// or the query reports GraphQL errors.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn category_products(
        &self,
        path: &str,
        first: i64,
    ) -> Result<Vec<CategoryProduct>, StorefrontError> {
        let body = GraphQLRequest {
            query: CATEGORY_PRODUCTS_QUERY,
            variables: CategoryProductsVariables {
                path: path.to_string(),
                first,
            },
        };

        let response = self
            .inner
            .client
            .post(format!("{}/graphql", self.inner.base_url))
            .bearer_auth(&self.inner.bearer_token)
            .json(&body)
            .send()
            .await?;

        let envelope: GraphQLResponse<CategoryProductsData> = Self::decode_json(response).await?;

        if let Some(errors) = envelope.errors
            && !errors.is_empty()
        {
            tracing::debug!(count = errors.len(), "GraphQL errors in response");
            return Err(StorefrontError::GraphQL(
                errors.into_iter().map(Into::into).collect(),
            ));
        }

        let data = envelope.data.ok_or_else(|| {
            StorefrontError::GraphQL(vec![super::GraphQLError {
                message: "No data in response".to_string(),
                locations: vec![],
                path: vec![],
            }])
        })?;

        Ok(data.into_products())
    }

    /// Resolve the shopper's current cart, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not decode.
    /// An empty lookup result is `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn current_cart(&self) -> Result<Option<CartRef>, StorefrontError> {
        let response = self
            .inner
            .client
            .get(format!("{}/api/storefront/cart", self.inner.base_url))
            .send()
            .await?;

        let carts: Vec<CartRef> = Self::decode_json(response).await?;
        Ok(carts.into_iter().next())
    }

    /// Create a cart containing the given line items.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// cart contents.
    #[instrument(skip(self, line_items), fields(count = line_items.len()))]
    pub async fn create_cart(
        &self,
        line_items: &[LineItem],
    ) -> Result<CartContents, StorefrontError> {
        let response = self
            .inner
            .client
            .post(format!("{}/api/storefront/carts", self.inner.base_url))
            .json(&CartWriteBody { line_items })
            .send()
            .await?;

        Self::decode_json(response).await
    }

    /// Append line items to an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// cart contents.
    #[instrument(skip(self, line_items), fields(cart_id = %cart_id, count = line_items.len()))]
    pub async fn add_cart_items(
        &self,
        cart_id: &CartId,
        line_items: &[LineItem],
    ) -> Result<CartContents, StorefrontError> {
        let response = self
            .inner
            .client
            .post(format!(
                "{}/api/storefront/carts/{cart_id}/items",
                self.inner.base_url
            ))
            .json(&CartWriteBody { line_items })
            .send()
            .await?;

        Self::decode_json(response).await
    }

    /// Delete a cart; success implies zero items remain.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint reports a
    /// non-success status.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn delete_cart(&self, cart_id: &CartId) -> Result<(), StorefrontError> {
        let response = self
            .inner
            .client
            .delete(format!(
                "{}/api/storefront/carts/{cart_id}",
                self.inner.base_url
            ))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "cart deletion failed");
            return Err(StorefrontError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CartStorefront for StorefrontClient {
    async fn category_products(
        &self,
        path: &str,
        first: i64,
    ) -> Result<Vec<CategoryProduct>, StorefrontError> {
        Self::category_products(self, path, first).await
    }

    async fn current_cart(&self) -> Result<Option<CartRef>, StorefrontError> {
        Self::current_cart(self).await
    }

    async fn create_cart(&self, line_items: &[LineItem]) -> Result<CartContents, StorefrontError> {
        Self::create_cart(self, line_items).await
    }

    async fn add_cart_items(
        &self,
        cart_id: &CartId,
        line_items: &[LineItem],
    ) -> Result<CartContents, StorefrontError> {
        Self::add_cart_items(self, cart_id, line_items).await
    }

    async fn delete_cart(&self, cart_id: &CartId) -> Result<(), StorefrontError> {
        Self::delete_cart(self, cart_id).await
    }
}
