use std::path::Path;

/// MIME type of a profile photo, chosen from its file extension.
///
/// Only PNG and WebP are recognized; everything else, including a missing
/// extension, is sent as JPEG.
pub fn photo_mime_type(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}
