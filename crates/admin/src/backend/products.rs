//! Product collection operations.

use reqwest::Method;
use tracing::instrument;

use bazaar_core::ProductId;

use super::types::{Product, ProductDraft};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, token))]
    pub async fn list_products(&self, token: &str) -> Result<Vec<Product>, BackendError> {
        Self::send_list(self.authed(Method::GET, "/api/admin/products", token)).await
    }

    /// Get a single product, or `None` if the backend has no such id.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a 404.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn get_product(
        &self,
        token: &str,
        id: ProductId,
    ) -> Result<Option<Product>, BackendError> {
        let request = self.authed(Method::GET, &format!("/api/admin/products/{id}"), token);
        match Self::send_json(request).await {
            Ok(product) => Ok(Some(product)),
            Err(BackendError::Api { status, .. }) if status == axum::http::StatusCode::NOT_FOUND => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Create a product. Returns the created entity with its assigned id
    /// and server-side defaults filled in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the session is rejected, or
    /// the backend rejects the payload.
    #[instrument(skip(self, token, draft), fields(name = %draft.name))]
    pub async fn create_product(
        &self,
        token: &str,
        draft: &ProductDraft,
    ) -> Result<Product, BackendError> {
        let request = self
            .authed(Method::POST, "/api/admin/products", token)
            .multipart(product_form(draft));
        Self::send_json(request).await
    }

    /// Update a product in place. Returns the updated entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the session is rejected, or
    /// the backend rejects the payload.
    #[instrument(skip(self, token, draft), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, BackendError> {
        let request = self
            .authed(Method::PUT, &format!("/api/admin/products/{id}"), token)
            .multipart(product_form(draft));
        Self::send_json(request).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), BackendError> {
        Self::send_ok(self.authed(Method::DELETE, &format!("/api/admin/products/{id}"), token))
            .await
    }
}

/// Build the multipart body for a product mutation.
///
/// Field names are snake_cased to match the backend schema.
fn product_form(draft: &ProductDraft) -> reqwest::multipart::Form {
    let form = reqwest::multipart::Form::new()
        .text("name", draft.name.clone())
        .text("price", draft.price.to_string())
        .text("rating", draft.rating.to_string())
        .text(
            "total_sold",
            if draft.total_sold.is_empty() {
                "0".to_string()
            } else {
                draft.total_sold.clone()
            },
        )
        .text("store", draft.store.clone())
        .text("description", draft.description.clone())
        .text("category", draft.category.clone())
        .text("stock", draft.stock.to_string())
        .text("condition", draft.condition.clone())
        .text("min_order", draft.min_order.max(1).to_string());

    BackendClient::attach_image(form, &draft.image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::types::ImageField;

    #[test]
    fn test_product_form_min_order_floor() {
        // The backend treats min_order 0 as invalid; the form floors it to 1.
        let draft = ProductDraft {
            name: "Mug".to_string(),
            min_order: 0,
            ..ProductDraft::default()
        };
        // Form construction must not panic and must include the image rule.
        let _ = product_form(&draft);
    }

    #[test]
    fn test_product_form_with_reference_image() {
        let draft = ProductDraft {
            name: "Mug".to_string(),
            image: ImageField::Reference("x.png".to_string()),
            ..ProductDraft::default()
        };
        let _ = product_form(&draft);
    }
}
