/// Resolve a stored image reference to something an `<img>` can load.
///
/// Absolute `http(s)://` URLs pass through unchanged; relative paths (as the
/// upload endpoint returns them, e.g. `/uploads/x.jpg`) are prefixed with the
/// API origin. An empty path resolves to nothing.
pub fn resolve_image_url(api_origin: &str, image_path: &str) -> Option<String> {
    let path = image_path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    let origin = api_origin.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{origin}{path}"))
    } else {
        Some(format!("{origin}/{path}"))
    }
}
