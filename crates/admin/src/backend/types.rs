//! Wire types for the Bazaar backend API.
//!
//! Every optional field carries a serde default so a deserialized entity
//! never exposes a missing value to rendering: optional strings default to
//! `""`, arrays to `[]`, and booleans to their documented defaults
//! (carousel `isActive` defaults to inactive; admin `is_active` defaults
//! to active).
//!
//! Products and carousel items are serialized camelCase by the backend;
//! admin accounts use snake_case. The mismatch is historical backend
//! schema, mirrored here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bazaar_core::{AdminRole, AdminUserId, CarouselItemId, Email, ProductId};

const fn default_min_order() -> u32 {
    1
}

const fn default_active() -> bool {
    true
}

/// A gallery image attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// A selectable product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// A store product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Invariant: non-negative.
    pub price: f64,
    /// Primary image reference (absolute URL or backend upload path).
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub rating: f64,
    /// Display counter kept as a string by the backend ("1.2k" etc.).
    #[serde(default)]
    pub total_sold: String,
    #[serde(default)]
    pub store: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// Units in stock. Invariant: non-negative integer.
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub condition: String,
    #[serde(default = "default_min_order")]
    pub min_order: u32,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Whether a carousel image reference is an external URL or an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    #[default]
    Url,
    File,
}

/// A homepage carousel banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub id: CarouselItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub image_type: ImageType,
    #[serde(default)]
    pub link: String,
    /// Display sort key; lists are ordered ascending by this value.
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: AdminUserId,
    pub email: Email,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AdminAccount {
    /// Display name, falling back to the email's local part.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            self.email.local_part().to_string()
        } else {
            self.name.clone()
        }
    }
}

/// Fields submitted when creating or updating a product.
///
/// The image slot carries either freshly uploaded bytes or the existing
/// reference string to keep.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub total_sold: String,
    pub store: String,
    pub description: String,
    pub category: String,
    pub stock: u32,
    pub condition: String,
    pub min_order: u32,
    pub image: ImageField,
}

/// Fields submitted when creating or updating a carousel banner.
#[derive(Debug, Clone, Default)]
pub struct CarouselDraft {
    pub title: String,
    pub description: String,
    pub link: String,
    pub order: i32,
    pub is_active: bool,
    pub category: String,
    pub image: ImageField,
}

/// Image slot of a mutating form.
#[derive(Debug, Clone, Default)]
pub enum ImageField {
    /// No image submitted; the backend keeps whatever it has.
    #[default]
    Unchanged,
    /// Keep an existing stored reference (or an external URL).
    Reference(String),
    /// Freshly uploaded bytes, already re-encoded where needed.
    Upload {
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Fields submitted when creating an admin account.
#[derive(Debug, Clone, Serialize)]
pub struct NewAdminAccount {
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_normalization_fills_optional_fields() {
        // Minimal backend payload: only required fields present.
        let json = r#"{"id": 7, "name": "Mug", "price": 12.5}"#;
        let product: Product = serde_json::from_str(json).expect("valid product json");

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.image, "");
        assert_eq!(product.description, "");
        assert_eq!(product.category, "");
        assert_eq!(product.condition, "");
        assert!(product.images.is_empty());
        assert!(product.variants.is_empty());
        assert!(product.features.is_empty());
        assert_eq!(product.stock, 0);
        assert_eq!(product.min_order, 1);
        assert!(product.created_at.is_none());
    }

    #[test]
    fn test_carousel_normalization_defaults() {
        let json = r#"{"id": 1, "title": "Spring Sale"}"#;
        let item: CarouselItem = serde_json::from_str(json).expect("valid carousel json");

        assert_eq!(item.description, "");
        assert_eq!(item.image, "");
        assert_eq!(item.link, "");
        assert_eq!(item.category, "");
        assert_eq!(item.order, 0);
        assert!(!item.is_active);
        assert_eq!(item.image_type, ImageType::Url);
    }

    #[test]
    fn test_carousel_camel_case_fields() {
        let json = r#"{"id": 2, "title": "B", "isActive": true, "imageType": "file"}"#;
        let item: CarouselItem = serde_json::from_str(json).expect("valid carousel json");
        assert!(item.is_active);
        assert_eq!(item.image_type, ImageType::File);
    }

    #[test]
    fn test_admin_account_snake_case_and_defaults() {
        let json = r#"{"id": 3, "email": "root@bazaar.dev", "last_login": null}"#;
        let admin: AdminAccount = serde_json::from_str(json).expect("valid admin json");

        assert!(admin.is_active);
        assert_eq!(admin.role, AdminRole::Admin);
        assert!(admin.last_login.is_none());
        assert_eq!(admin.display_name(), "root");
    }

    #[test]
    fn test_admin_role_parsing() {
        let json = r#"{"id": 1, "email": "a@b.c", "name": "A", "role": "superadmin"}"#;
        let admin: AdminAccount = serde_json::from_str(json).expect("valid admin json");
        assert!(admin.role.is_superadmin());
    }
}
