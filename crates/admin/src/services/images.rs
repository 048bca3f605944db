//! Upload preprocessing for product and carousel images.
//!
//! The backend stores whatever bytes it is handed, so the panel converts
//! uploads to AVIF before forwarding them. Files already in AVIF or WebP
//! pass through untouched. A failed conversion aborts the submit; the raw
//! original is never forwarded.

use std::io::Cursor;

use image::codecs::avif::AvifEncoder;
use thiserror::Error;

use crate::backend::types::ImageField;

/// AVIF encoder speed, 1 (slowest, best) to 10. Uploads happen in an
/// interactive request, so favor speed.
const AVIF_SPEED: u8 = 8;

/// AVIF quality, 1 to 100.
const AVIF_QUALITY: u8 = 80;

/// Errors from upload preprocessing.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The uploaded file had no content.
    #[error("uploaded file is empty")]
    Empty,

    /// The upload is not an image.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// The bytes could not be decoded as an image.
    #[error("could not read image: {0}")]
    Decode(image::ImageError),

    /// Re-encoding to AVIF failed.
    #[error("could not convert image to AVIF: {0}")]
    Encode(image::ImageError),

    /// The conversion task was cancelled before it finished.
    #[error("image conversion was interrupted")]
    Interrupted,
}

/// MIME types forwarded without conversion.
const PASSTHROUGH_TYPES: &[&str] = &["image/avif", "image/webp"];

/// Convert an upload for submission to the backend.
///
/// Decoding and AVIF encoding are CPU-bound, so the work runs on the
/// blocking pool.
///
/// # Errors
///
/// Returns [`ImageError::UnsupportedType`] for non-image uploads,
/// [`ImageError::Empty`] for zero-length files, and decode/encode errors
/// when the bytes are not a valid image or AVIF encoding fails.
pub async fn prepare_upload(
    filename: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> Result<ImageField, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if !content_type.starts_with("image/") {
        return Err(ImageError::UnsupportedType(content_type.to_string()));
    }

    if PASSTHROUGH_TYPES.contains(&content_type) {
        return Ok(ImageField::Upload {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            bytes,
        });
    }

    let converted = tokio::task::spawn_blocking(move || encode_avif(&bytes))
        .await
        .map_err(|_| ImageError::Interrupted)??;

    Ok(ImageField::Upload {
        filename: avif_filename(filename),
        content_type: "image/avif".to_string(),
        bytes: converted,
    })
}

fn encode_avif(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let decoded = image::load_from_memory(bytes).map_err(ImageError::Decode)?;

    let mut out = Vec::new();
    let encoder = AvifEncoder::new_with_speed_quality(Cursor::new(&mut out), AVIF_SPEED, AVIF_QUALITY);
    decoded
        .write_with_encoder(encoder)
        .map_err(ImageError::Encode)?;

    Ok(out)
}

/// Swap the filename extension for `.avif`, keeping the stem.
fn avif_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.avif"),
        _ => format!("{filename}.avif"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avif_filename_replaces_extension() {
        assert_eq!(avif_filename("banner.png"), "banner.avif");
        assert_eq!(avif_filename("archive.tar.gz"), "archive.tar.avif");
    }

    #[test]
    fn test_avif_filename_without_extension() {
        assert_eq!(avif_filename("banner"), "banner.avif");
        assert_eq!(avif_filename(".hidden"), ".hidden.avif");
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let result = prepare_upload("x.png", "image/png", Vec::new()).await;
        assert!(matches!(result, Err(ImageError::Empty)));
    }

    #[tokio::test]
    async fn test_non_image_rejected() {
        let result = prepare_upload("x.pdf", "application/pdf", vec![1, 2, 3]).await;
        assert!(matches!(result, Err(ImageError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_webp_passes_through() {
        let bytes = vec![0x52, 0x49, 0x46, 0x46];
        let result = prepare_upload("photo.webp", "image/webp", bytes.clone()).await;
        match result {
            Ok(ImageField::Upload {
                filename,
                content_type,
                bytes: out,
            }) => {
                assert_eq!(filename, "photo.webp");
                assert_eq!(content_type, "image/webp");
                assert_eq!(out, bytes);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_decode() {
        let result = prepare_upload("x.png", "image/png", vec![0u8; 16]).await;
        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[tokio::test]
    async fn test_png_converts_to_avif() {
        // Encode a tiny PNG in-process, then run it through the pipeline.
        let mut png = Vec::new();
        let img = image::DynamicImage::new_rgb8(2, 2);
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("encode png");

        let result = prepare_upload("pixel.png", "image/png", png).await;
        match result {
            Ok(ImageField::Upload {
                filename,
                content_type,
                bytes,
            }) => {
                assert_eq!(filename, "pixel.avif");
                assert_eq!(content_type, "image/avif");
                assert!(!bytes.is_empty());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
