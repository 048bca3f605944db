//! Carousel banner collection operations.

use reqwest::Method;
use tracing::instrument;

use bazaar_core::CarouselItemId;

use super::types::{CarouselDraft, CarouselItem};
use super::{BackendClient, BackendError};

impl BackendClient {
    /// List all carousel banners, sorted by display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, token))]
    pub async fn list_carousels(&self, token: &str) -> Result<Vec<CarouselItem>, BackendError> {
        let mut items: Vec<CarouselItem> =
            Self::send_list(self.authed(Method::GET, "/api/admin/carousels", token)).await?;
        items.sort_by_key(|item| item.order);
        Ok(items)
    }

    /// Get a single banner, or `None` if the backend has no such id.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a 404.
    #[instrument(skip(self, token), fields(carousel_id = %id))]
    pub async fn get_carousel(
        &self,
        token: &str,
        id: CarouselItemId,
    ) -> Result<Option<CarouselItem>, BackendError> {
        let request = self.authed(Method::GET, &format!("/api/admin/carousels/{id}"), token);
        match Self::send_json(request).await {
            Ok(item) => Ok(Some(item)),
            Err(BackendError::Api { status, .. }) if status == axum::http::StatusCode::NOT_FOUND => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Create a banner. Returns the created entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the session is rejected, or
    /// the backend rejects the payload.
    #[instrument(skip(self, token, draft), fields(title = %draft.title))]
    pub async fn create_carousel(
        &self,
        token: &str,
        draft: &CarouselDraft,
    ) -> Result<CarouselItem, BackendError> {
        let request = self
            .authed(Method::POST, "/api/admin/carousels", token)
            .multipart(carousel_form(draft));
        Self::send_json(request).await
    }

    /// Update a banner in place. Returns the updated entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the session is rejected, or
    /// the backend rejects the payload.
    #[instrument(skip(self, token, draft), fields(carousel_id = %id))]
    pub async fn update_carousel(
        &self,
        token: &str,
        id: CarouselItemId,
        draft: &CarouselDraft,
    ) -> Result<CarouselItem, BackendError> {
        let request = self
            .authed(Method::PUT, &format!("/api/admin/carousels/{id}"), token)
            .multipart(carousel_form(draft));
        Self::send_json(request).await
    }

    /// Delete a banner.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is rejected.
    #[instrument(skip(self, token), fields(carousel_id = %id))]
    pub async fn delete_carousel(
        &self,
        token: &str,
        id: CarouselItemId,
    ) -> Result<(), BackendError> {
        Self::send_ok(self.authed(Method::DELETE, &format!("/api/admin/carousels/{id}"), token))
            .await
    }
}

/// Build the multipart body for a carousel mutation.
fn carousel_form(draft: &CarouselDraft) -> reqwest::multipart::Form {
    let form = reqwest::multipart::Form::new()
        .text("title", draft.title.clone())
        .text("description", draft.description.clone())
        .text("link", draft.link.clone())
        .text("order", draft.order.to_string())
        .text("isActive", draft.is_active.to_string())
        .text("category", draft.category.clone());

    BackendClient::attach_image(form, &draft.image)
}
