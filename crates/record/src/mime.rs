use std::path::Path;

/// Fold browser-era jpeg/png aliases to their canonical types. Some user
/// agents still declare these during upload.
pub(crate) fn normalize(mime: &str) -> String {
    let lower = mime.to_ascii_lowercase();
    match lower.as_str() {
        "image/x-png" => "image/png".to_string(),
        "image/jpg" | "image/jpe" | "image/pjpeg" => "image/jpeg".to_string(),
        _ => lower,
    }
}

/// True for the image types the dimension probe understands.
pub(crate) fn is_image(normalized: &str) -> bool {
    matches!(normalized, "image/gif" | "image/jpeg" | "image/png")
}

/// Best-effort content-type probe for filesystem inputs; unknown types
/// yield an empty string rather than an error.
pub(crate) fn sniff(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string()
}
