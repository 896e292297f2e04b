//! Destination filename resolution.
//!
//! The filename comes from the last URL path segment when that segment looks
//! like a file (has an extension); otherwise a generic name is built from the
//! declared image subtype. Existing files are not consulted: a later image with
//! the same name overwrites an earlier one.

mod path;
mod sanitize;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;

/// Stem used when the URL path gives no usable filename.
pub const FALLBACK_STEM: &str = "downloaded_image";

/// Extension used when the declared subtype is not one we map explicitly.
const DEFAULT_EXTENSION: &str = "jpg";

static KNOWN_SUBTYPES: [&str; 4] = ["jpeg", "png", "gif", "webp"];

/// Resolves the filename for an image fetched from `url`.
///
/// # Examples
///
/// - `resolve_filename("http://x.com/pics/cat.png", Some("image/png"))` → `"cat.png"`
/// - `resolve_filename("http://x.com/pics/", Some("image/webp"))` → `"downloaded_image.webp"`
/// - `resolve_filename("http://x.com/pics/", Some("image/bmp"))` → `"downloaded_image.jpg"`
pub fn resolve_filename(url: &str, content_type: Option<&str>) -> String {
    let candidate = filename_from_url_path(url)
        .map(|s| sanitize_filename_for_linux(&s))
        .filter(|s| !s.is_empty() && s.contains('.'));

    match candidate {
        Some(name) => name,
        None => format!("{}.{}", FALLBACK_STEM, extension_for(content_type)),
    }
}

/// Maps a declared `Content-Type` to a file extension.
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let subtype = content_type
        .and_then(|ct| ct.split(';').next())
        .and_then(|mime| mime.rsplit_once('/'))
        .map(|(_, sub)| sub.trim().to_ascii_lowercase());

    subtype
        .as_deref()
        .and_then(|sub| KNOWN_SUBTYPES.iter().find(|known| **known == sub))
        .copied()
        .unwrap_or(DEFAULT_EXTENSION)
}
