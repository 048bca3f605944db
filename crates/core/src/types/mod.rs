//! Core type definitions.

pub mod email;
pub mod id;
pub mod image;
pub mod role;

pub use email::{Email, EmailError};
pub use id::{AdminUserId, CarouselItemId, ProductId};
pub use image::{resolve_image_url, upload_reference};
pub use role::AdminRole;
