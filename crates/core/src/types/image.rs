//! Canonical image reference resolution.
//!
//! Stored image references arrive from the backend in several historical
//! shapes: bare filenames, `uploads/...` paths (sometimes with the prefix
//! doubled), Windows-style backslash paths, and fully absolute URLs. These
//! two functions are the single place where those shapes are reconciled.

/// Resolve a stored image reference to an absolute URL.
///
/// Rules, applied in order:
/// - An empty reference resolves to an empty string.
/// - Backslashes are normalized to forward slashes.
/// - Any reference containing an `uploads/` segment is reduced to the part
///   after the *last* such segment and rebuilt as
///   `{backend_origin}/uploads/{name}`. This collapses doubled prefixes
///   like `/uploads/uploads/x.png` regardless of which host the reference
///   names.
/// - Other absolute `http://`/`https://` references pass through unchanged.
/// - Anything else is treated as a bare upload filename under the backend
///   origin.
#[must_use]
pub fn resolve_image_url(reference: &str, backend_origin: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }

    let normalized = reference.replace('\\', "/");
    let origin = backend_origin.trim_end_matches('/');

    if let Some((_, name)) = normalized.rsplit_once("uploads/") {
        return format!("{origin}/uploads/{name}");
    }

    if normalized.starts_with("http://") || normalized.starts_with("https://") {
        return normalized;
    }

    let name = normalized.trim_start_matches('/');
    format!("{origin}/uploads/{name}")
}

/// Reduce a stored image reference to the form submitted back to the
/// backend when the image is unchanged.
///
/// Upload paths are reduced to the bare filename after the last
/// `uploads/` segment; external absolute URLs pass through unchanged.
#[must_use]
pub fn upload_reference(reference: &str) -> String {
    let normalized = reference.replace('\\', "/");

    if let Some((_, name)) = normalized.rsplit_once("uploads/") {
        return name.to_owned();
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:8080";

    #[test]
    fn test_empty_reference() {
        assert_eq!(resolve_image_url("", ORIGIN), "");
    }

    #[test]
    fn test_relative_upload_path() {
        assert_eq!(
            resolve_image_url("uploads/x.png", ORIGIN),
            "http://localhost:8080/uploads/x.png"
        );
    }

    #[test]
    fn test_doubled_uploads_prefix_collapses() {
        // Both shapes must resolve to the same canonical URL with exactly
        // one /uploads/ segment.
        let canonical = "http://localhost:8080/uploads/x.png";
        assert_eq!(resolve_image_url("uploads/x.png", ORIGIN), canonical);
        assert_eq!(
            resolve_image_url("http://host/uploads/uploads/x.png", ORIGIN),
            canonical
        );
        assert_eq!(
            resolve_image_url("/uploads/uploads/x.png", ORIGIN),
            canonical
        );
    }

    #[test]
    fn test_backslash_paths() {
        assert_eq!(
            resolve_image_url("uploads\\banners\\x.png", ORIGIN),
            "http://localhost:8080/uploads/banners/x.png"
        );
    }

    #[test]
    fn test_external_url_passes_through() {
        let external = "https://cdn.example.com/img/product.jpg";
        assert_eq!(resolve_image_url(external, ORIGIN), external);
    }

    #[test]
    fn test_bare_filename() {
        assert_eq!(
            resolve_image_url("x.png", ORIGIN),
            "http://localhost:8080/uploads/x.png"
        );
    }

    #[test]
    fn test_origin_trailing_slash() {
        assert_eq!(
            resolve_image_url("uploads/x.png", "http://localhost:8080/"),
            "http://localhost:8080/uploads/x.png"
        );
    }

    #[test]
    fn test_upload_reference_strips_to_filename() {
        assert_eq!(upload_reference("uploads/x.png"), "x.png");
        assert_eq!(
            upload_reference("http://localhost:8080/uploads/uploads/x.png"),
            "x.png"
        );
        assert_eq!(upload_reference("uploads\\x.png"), "x.png");
    }

    #[test]
    fn test_upload_reference_external_url_unchanged() {
        let external = "https://cdn.example.com/img/product.jpg";
        assert_eq!(upload_reference(external), external);
    }
}
