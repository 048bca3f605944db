//! Integration tests for backend response normalization.
//!
//! The backend omits optional fields freely; deserialized entities must
//! come out with the documented defaults so views never branch on
//! missing data.

use bazaar_admin::backend::types::{AdminAccount, CarouselItem, ImageType, Product};
use bazaar_core::AdminRole;

// =============================================================================
// Products
// =============================================================================

#[test]
fn test_minimal_product_fills_defaults() {
    let product: Product = serde_json::from_str(
        r#"{"id": 7, "name": "Mug", "price": 12.5}"#,
    )
    .expect("minimal product should deserialize");

    assert_eq!(product.id.as_i32(), 7);
    assert_eq!(product.image, "");
    assert!(product.images.is_empty());
    assert!(product.variants.is_empty());
    assert!(product.features.is_empty());
    assert_eq!(product.description, "");
    assert_eq!(product.category, "");
    assert_eq!(product.total_sold, "");
    assert_eq!(product.stock, 0);
    assert_eq!(product.min_order, 1, "min_order defaults to 1, not 0");
    assert!(product.created_at.is_none());
}

#[test]
fn test_product_camel_case_wire_format() {
    let product: Product = serde_json::from_str(
        r#"{"id": 1, "name": "Mug", "price": 1.0, "minOrder": 5, "totalSold": "1.2k"}"#,
    )
    .expect("camelCase fields should map");

    assert_eq!(product.min_order, 5);
    assert_eq!(product.total_sold, "1.2k");
}

// =============================================================================
// Carousel
// =============================================================================

#[test]
fn test_minimal_carousel_item_fills_defaults() {
    let item: CarouselItem =
        serde_json::from_str(r#"{"id": 3, "title": "Sale"}"#).expect("minimal item");

    assert_eq!(item.description, "");
    assert_eq!(item.link, "");
    assert_eq!(item.order, 0);
    assert!(!item.is_active, "banners default to inactive");
    assert_eq!(item.image_type, ImageType::Url);
}

#[test]
fn test_carousel_image_type_lowercase() {
    let item: CarouselItem =
        serde_json::from_str(r#"{"id": 3, "title": "Sale", "imageType": "file"}"#)
            .expect("imageType should map");
    assert_eq!(item.image_type, ImageType::File);
}

// =============================================================================
// Admin accounts
// =============================================================================

#[test]
fn test_minimal_admin_account_fills_defaults() {
    let account: AdminAccount =
        serde_json::from_str(r#"{"id": 2, "email": "ops@bazaar.dev"}"#).expect("minimal account");

    assert_eq!(account.role, AdminRole::Admin);
    assert!(account.is_active, "accounts default to active");
    assert_eq!(account.display_name(), "ops");
    assert!(account.last_login.is_none());
}

#[test]
fn test_admin_account_snake_case_wire_format() {
    // Unlike products and carousel, the admin collection uses snake_case.
    let account: AdminAccount = serde_json::from_str(
        r#"{"id": 2, "email": "ops@bazaar.dev", "is_active": false, "role": "superadmin"}"#,
    )
    .expect("snake_case fields should map");

    assert!(!account.is_active);
    assert!(account.role.is_superadmin());
}
