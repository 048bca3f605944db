//! Carousel banner management route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tracing::instrument;

use bazaar_core::{CarouselItemId, resolve_image_url, upload_reference};

use crate::{
    backend::types::{CarouselDraft, CarouselItem, ImageField},
    error::AppError,
    filters,
    middleware::RequireBackendSession,
    services,
    state::AppState,
};

use super::ConfirmDeleteTemplate;
use super::dashboard::AdminUserView;

/// Banner row for the list view. The list arrives pre-sorted by the
/// display order key.
#[derive(Debug, Clone)]
pub struct CarouselView {
    pub id: i32,
    pub title: String,
    pub order: i32,
    pub is_active: bool,
    pub category: String,
    pub image_url: String,
}

impl CarouselView {
    fn from_item(item: &CarouselItem, backend_origin: &str) -> Self {
        Self {
            id: item.id.as_i32(),
            title: item.title.clone(),
            order: item.order,
            is_active: item.is_active,
            category: item.category.clone(),
            image_url: resolve_image_url(&item.image, backend_origin),
        }
    }
}

/// Carousel list page template.
#[derive(Template)]
#[template(path = "carousel/index.html")]
pub struct CarouselIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub banners: Vec<CarouselView>,
    pub error: Option<String>,
}

/// Form values as submitted, for lossless re-render on failure.
#[derive(Debug, Clone, Default)]
pub struct CarouselFormView {
    pub title: String,
    pub description: String,
    pub link: String,
    pub order: String,
    pub is_active: bool,
    pub category: String,
    pub image_url: String,
}

impl CarouselFormView {
    fn from_item(item: &CarouselItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            link: item.link.clone(),
            order: item.order.to_string(),
            is_active: item.is_active,
            category: item.category.clone(),
            image_url: item.image.clone(),
        }
    }

    fn to_draft(&self, image: ImageField) -> CarouselDraft {
        CarouselDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            link: self.link.trim().to_string(),
            order: self.order.trim().parse().unwrap_or_default(),
            is_active: self.is_active,
            category: self.category.trim().to_string(),
            image,
        }
    }
}

/// Carousel create/edit form template.
#[derive(Template)]
#[template(path = "carousel/form.html")]
pub struct CarouselFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub heading: String,
    pub action: String,
    pub form: CarouselFormView,
    pub error: Option<String>,
    pub image_error: Option<String>,
}

struct UploadData {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Build the carousel router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/carousel", get(index).post(create))
        .route("/carousel/new", get(new_form))
        .route("/carousel/{id}", axum::routing::post(update))
        .route("/carousel/{id}/edit", get(edit_form))
        .route("/carousel/{id}/delete", get(confirm_delete).post(delete))
}

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Banner list page, ordered by the display sort key.
///
/// GET /carousel
#[instrument(skip(auth, state))]
pub async fn index(auth: RequireBackendSession, State(state): State<AppState>) -> Response {
    let (banners, error) = match state.backend().list_carousels(&auth.token).await {
        Ok(items) => {
            let origin = state.backend().base_url();
            let views = items
                .iter()
                .map(|item| CarouselView::from_item(item, origin))
                .collect();
            (views, None)
        }
        Err(e) if e.is_unauthorized() => return Redirect::to("/auth/login").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch carousel banners: {e}");
            (vec![], Some(e.user_message()))
        }
    };

    let template = CarouselIndexTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/carousel".to_string(),
        banners,
        error,
    };
    render(&template).into_response()
}

/// Empty create form.
///
/// GET /carousel/new
pub async fn new_form(auth: RequireBackendSession) -> Response {
    let template = CarouselFormTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/carousel".to_string(),
        heading: "New banner".to_string(),
        action: "/carousel".to_string(),
        form: CarouselFormView::default(),
        error: None,
        image_error: None,
    };
    render(&template).into_response()
}

/// Edit form prefilled from the backend.
///
/// GET /carousel/{id}/edit
#[instrument(skip(auth, state))]
pub async fn edit_form(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = CarouselItemId::new(id);
    let item = state
        .backend()
        .get_carousel(&auth.token, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("carousel banner {id}")))?;

    let template = CarouselFormTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/carousel".to_string(),
        heading: format!("Edit {}", item.title),
        action: format!("/carousel/{id}"),
        form: CarouselFormView::from_item(&item),
        error: None,
        image_error: None,
    };
    Ok(render(&template).into_response())
}

/// Create a banner and return to the list.
///
/// POST /carousel
#[instrument(skip(auth, state, multipart))]
pub async fn create(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (form, upload) = parse_form(multipart).await?;
    submit(
        &auth,
        &state,
        form,
        upload,
        "New banner".to_string(),
        "/carousel".to_string(),
        None,
    )
    .await
}

/// Update a banner and return to the list.
///
/// POST /carousel/{id}
#[instrument(skip(auth, state, multipart))]
pub async fn update(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let id = CarouselItemId::new(id);
    let (form, upload) = parse_form(multipart).await?;
    submit(
        &auth,
        &state,
        form,
        upload,
        "Edit banner".to_string(),
        format!("/carousel/{id}"),
        Some(id),
    )
    .await
}

/// Delete confirmation page.
///
/// GET /carousel/{id}/delete
#[instrument(skip(auth, state))]
pub async fn confirm_delete(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = CarouselItemId::new(id);
    let item = state
        .backend()
        .get_carousel(&auth.token, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("carousel banner {id}")))?;

    let template = ConfirmDeleteTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/carousel".to_string(),
        subject: format!("banner \"{}\"", item.title),
        action: format!("/carousel/{id}/delete"),
        cancel: "/carousel".to_string(),
    };
    Ok(render(&template).into_response())
}

/// Perform the deletion.
///
/// POST /carousel/{id}/delete
#[instrument(skip(auth, state))]
pub async fn delete(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    state
        .backend()
        .delete_carousel(&auth.token, CarouselItemId::new(id))
        .await?;
    Ok(Redirect::to("/carousel"))
}

async fn submit(
    auth: &RequireBackendSession,
    state: &AppState,
    form: CarouselFormView,
    upload: Option<UploadData>,
    heading: String,
    action: String,
    id: Option<CarouselItemId>,
) -> Result<Response, AppError> {
    let rerender = |form: CarouselFormView, error: Option<String>, image_error: Option<String>| {
        let template = CarouselFormTemplate {
            admin_user: AdminUserView::from(&auth.admin),
            current_path: "/carousel".to_string(),
            heading: heading.clone(),
            action: action.clone(),
            form,
            error,
            image_error,
        };
        render(&template).into_response()
    };

    let image = match resolve_image_field(&form, upload).await {
        Ok(image) => image,
        Err(e) => return Ok(rerender(form, None, Some(e.to_string()))),
    };

    let draft = form.to_draft(image);
    let result = match id {
        Some(id) => {
            state
                .backend()
                .update_carousel(&auth.token, id, &draft)
                .await
        }
        None => state.backend().create_carousel(&auth.token, &draft).await,
    };

    match result {
        Ok(item) => {
            tracing::info!(carousel_id = %item.id, "Carousel banner saved");
            Ok(Redirect::to("/carousel").into_response())
        }
        Err(e) if e.is_unauthorized() => Ok(Redirect::to("/auth/login").into_response()),
        Err(e) => Ok(rerender(form, Some(e.user_message()), None)),
    }
}

async fn resolve_image_field(
    form: &CarouselFormView,
    upload: Option<UploadData>,
) -> Result<ImageField, crate::services::ImageError> {
    if let Some(upload) = upload {
        return services::prepare_upload(&upload.filename, &upload.content_type, upload.bytes)
            .await;
    }
    let reference = form.image_url.trim();
    if reference.is_empty() {
        Ok(ImageField::Unchanged)
    } else {
        Ok(ImageField::Reference(upload_reference(reference)))
    }
}

async fn parse_form(
    mut multipart: Multipart,
) -> Result<(CarouselFormView, Option<UploadData>), AppError> {
    let mut form = CarouselFormView::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid form body: {e}")))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == "image_file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
            if !bytes.is_empty() {
                upload = Some(UploadData {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid form field: {e}")))?;
        match name.as_str() {
            "title" => form.title = value,
            "description" => form.description = value,
            "link" => form.link = value,
            "order" => form.order = value,
            // Checkboxes submit a value only when ticked.
            "is_active" => form.is_active = true,
            "category" => form.category = value,
            "image_url" => form.image_url = value,
            _ => {}
        }
    }

    Ok((form, upload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_coercion() {
        let form = CarouselFormView {
            order: " 3 ".to_string(),
            ..CarouselFormView::default()
        };
        assert_eq!(form.to_draft(ImageField::Unchanged).order, 3);

        let form = CarouselFormView {
            order: "junk".to_string(),
            ..CarouselFormView::default()
        };
        assert_eq!(form.to_draft(ImageField::Unchanged).order, 0);
    }

    #[test]
    fn test_active_flag_defaults_off() {
        // Unticked checkboxes never reach the server.
        let form = CarouselFormView::default();
        assert!(!form.to_draft(ImageField::Unchanged).is_active);
    }
}
