//! Product management route handlers.

use askama::Template;
use axum::{
    Router,
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tracing::instrument;

use bazaar_core::{ProductId, resolve_image_url, upload_reference};

use crate::{
    backend::types::{ImageField, Product, ProductDraft},
    error::AppError,
    filters,
    middleware::RequireBackendSession,
    services,
    state::AppState,
};

use super::ConfirmDeleteTemplate;
use super::dashboard::AdminUserView;

/// Product row for the list view.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub image_url: String,
}

impl ProductView {
    fn from_product(product: &Product, backend_origin: &str) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            stock: product.stock,
            image_url: resolve_image_url(&product.image, backend_origin),
        }
    }
}

/// Product list page template.
#[derive(Template)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub products: Vec<ProductView>,
    /// Backend failure message. Distinct from an empty list.
    pub error: Option<String>,
}

/// Form values, kept as submitted strings so a failed submit re-renders
/// exactly what the admin typed.
#[derive(Debug, Clone, Default)]
pub struct ProductFormView {
    pub name: String,
    pub price: String,
    pub rating: String,
    pub total_sold: String,
    pub store: String,
    pub description: String,
    pub category: String,
    pub stock: String,
    pub condition: String,
    pub min_order: String,
    pub image_url: String,
}

impl ProductFormView {
    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            rating: product.rating.to_string(),
            total_sold: product.total_sold.clone(),
            store: product.store.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            stock: product.stock.to_string(),
            condition: product.condition.clone(),
            min_order: product.min_order.to_string(),
            image_url: product.image.clone(),
        }
    }

    /// Coerce the submitted strings into a draft. Blank or malformed
    /// numerics fall back to their documented defaults.
    fn to_draft(&self, image: ImageField) -> ProductDraft {
        ProductDraft {
            name: self.name.trim().to_string(),
            price: parse_f64(&self.price).max(0.0),
            rating: parse_f64(&self.rating).clamp(0.0, 5.0),
            total_sold: self.total_sold.trim().to_string(),
            store: self.store.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            stock: parse_u32(&self.stock, 0),
            condition: self.condition.trim().to_string(),
            min_order: parse_u32(&self.min_order, 1).max(1),
            image,
        }
    }
}

fn parse_f64(value: &str) -> f64 {
    value.trim().parse().unwrap_or_default()
}

fn parse_u32(value: &str, default: u32) -> u32 {
    value.trim().parse().unwrap_or(default)
}

/// Product create/edit form template.
#[derive(Template)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub heading: String,
    /// POST target.
    pub action: String,
    pub form: ProductFormView,
    /// Backend rejection message.
    pub error: Option<String>,
    /// Image conversion failure; independent of `error`.
    pub image_error: Option<String>,
}

/// A file picked in the form's upload slot.
struct UploadData {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/new", get(new_form))
        .route("/products/{id}", axum::routing::post(update))
        .route("/products/{id}/edit", get(edit_form))
        .route("/products/{id}/delete", get(confirm_delete).post(delete))
}

fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
}

/// Product list page.
///
/// GET /products
#[instrument(skip(auth, state))]
pub async fn index(auth: RequireBackendSession, State(state): State<AppState>) -> Response {
    let (products, error) = match state.backend().list_products(&auth.token).await {
        Ok(products) => {
            let origin = state.backend().base_url();
            let views = products
                .iter()
                .map(|p| ProductView::from_product(p, origin))
                .collect();
            (views, None)
        }
        Err(e) if e.is_unauthorized() => return Redirect::to("/auth/login").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (vec![], Some(e.user_message()))
        }
    };

    let template = ProductsIndexTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/products".to_string(),
        products,
        error,
    };
    render(&template).into_response()
}

/// Empty create form.
///
/// GET /products/new
pub async fn new_form(auth: RequireBackendSession) -> Response {
    let template = ProductFormTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/products".to_string(),
        heading: "New product".to_string(),
        action: "/products".to_string(),
        form: ProductFormView {
            min_order: "1".to_string(),
            ..ProductFormView::default()
        },
        error: None,
        image_error: None,
    };
    render(&template).into_response()
}

/// Edit form prefilled from the backend.
///
/// GET /products/{id}/edit
#[instrument(skip(auth, state))]
pub async fn edit_form(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let product = state
        .backend()
        .get_product(&auth.token, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let template = ProductFormTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/products".to_string(),
        heading: format!("Edit {}", product.name),
        action: format!("/products/{id}"),
        form: ProductFormView::from_product(&product),
        error: None,
        image_error: None,
    };
    Ok(render(&template).into_response())
}

/// Create a product and return to the list.
///
/// POST /products
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
        "New product".to_string(),
        "/products".to_string(),
        None,
    )
    .await
}

/// Update a product and return to the list.
///
/// POST /products/{id}
#[instrument(skip(auth, state, multipart))]
pub async fn update(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let (form, upload) = parse_form(multipart).await?;
    submit(
        &auth,
        &state,
        form,
        upload,
        "Edit product".to_string(),
        format!("/products/{id}"),
        Some(id),
    )
    .await
}

/// Delete confirmation page. The delete request is only issued when this
/// form is submitted; cancel navigates back without any backend call.
///
/// GET /products/{id}/delete
#[instrument(skip(auth, state))]
pub async fn confirm_delete(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let product = state
        .backend()
        .get_product(&auth.token, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let template = ConfirmDeleteTemplate {
        admin_user: AdminUserView::from(&auth.admin),
        current_path: "/products".to_string(),
        subject: format!("product \"{}\"", product.name),
        action: format!("/products/{id}/delete"),
        cancel: "/products".to_string(),
    };
    Ok(render(&template).into_response())
}

/// Perform the deletion.
///
/// POST /products/{id}/delete
#[instrument(skip(auth, state))]
pub async fn delete(
    auth: RequireBackendSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    state
        .backend()
        .delete_product(&auth.token, ProductId::new(id))
        .await?;
    Ok(Redirect::to("/products"))
}

/// Shared create/update tail: resolve the image slot, submit, and either
/// redirect to the list or re-render the form with the failure.
async fn submit(
    auth: &RequireBackendSession,
    state: &AppState,
    form: ProductFormView,
    upload: Option<UploadData>,
    heading: String,
    action: String,
    id: Option<ProductId>,
) -> Result<Response, AppError> {
    let rerender = |form: ProductFormView, error: Option<String>, image_error: Option<String>| {
        let template = ProductFormTemplate {
            admin_user: AdminUserView::from(&auth.admin),
            current_path: "/products".to_string(),
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
        // Conversion failure discards the file; the form error slot stays
        // empty.
        Err(e) => return Ok(rerender(form, None, Some(e.to_string()))),
    };

    let draft = form.to_draft(image);
    let result = match id {
        Some(id) => state.backend().update_product(&auth.token, id, &draft).await,
        None => state.backend().create_product(&auth.token, &draft).await,
    };

    match result {
        Ok(product) => {
            tracing::info!(product_id = %product.id, "Product saved");
            Ok(Redirect::to("/products").into_response())
        }
        Err(e) if e.is_unauthorized() => Ok(Redirect::to("/auth/login").into_response()),
        Err(e) => Ok(rerender(form, Some(e.user_message()), None)),
    }
}

async fn resolve_image_field(
    form: &ProductFormView,
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

/// Read the multipart body into form values plus an optional upload.
async fn parse_form(
    mut multipart: Multipart,
) -> Result<(ProductFormView, Option<UploadData>), AppError> {
    let mut form = ProductFormView::default();
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
            "name" => form.name = value,
            "price" => form.price = value,
            "rating" => form.rating = value,
            "total_sold" => form.total_sold = value,
            "store" => form.store = value,
            "description" => form.description = value,
            "category" => form.category = value,
            "stock" => form.stock = value,
            "condition" => form.condition = value,
            "min_order" => form.min_order = value,
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
    fn test_numeric_coercion_defaults() {
        let form = ProductFormView {
            name: " Mug ".to_string(),
            price: "not a number".to_string(),
            stock: "".to_string(),
            min_order: "0".to_string(),
            rating: "7".to_string(),
            ..ProductFormView::default()
        };
        let draft = form.to_draft(ImageField::Unchanged);
        assert_eq!(draft.name, "Mug");
        assert!((draft.price - 0.0).abs() < f64::EPSILON);
        assert_eq!(draft.stock, 0);
        assert_eq!(draft.min_order, 1);
        assert!((draft.rating - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_price_clamped() {
        let form = ProductFormView {
            price: "-4.50".to_string(),
            ..ProductFormView::default()
        };
        let draft = form.to_draft(ImageField::Unchanged);
        assert!(draft.price >= 0.0);
    }

    #[test]
    fn test_form_view_round_trips_product() {
        let form = ProductFormView {
            name: "Mug".to_string(),
            price: "12.5".to_string(),
            stock: "3".to_string(),
            min_order: "2".to_string(),
            ..ProductFormView::default()
        };
        let draft = form.to_draft(ImageField::Unchanged);
        assert!((draft.price - 12.5).abs() < f64::EPSILON);
        assert_eq!(draft.stock, 3);
        assert_eq!(draft.min_order, 2);
    }
}
