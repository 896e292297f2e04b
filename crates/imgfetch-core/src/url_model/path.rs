//! Filename extraction from URL path.

/// Extracts the final path segment of a URL (the text after the last `/`).
///
/// Query and fragment are ignored. Returns `None` if the URL cannot be parsed,
/// the path ends in `/`, or the path is root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            filename_from_url_path("https://example.com/a/b/kitten.png").as_deref(),
            Some("kitten.png")
        );
        assert_eq!(
            filename_from_url_path("https://example.com/single").as_deref(),
            Some("single")
        );
    }

    #[test]
    fn trailing_slash_has_no_filename() {
        assert_eq!(filename_from_url_path("https://example.com/pics/"), None);
        assert_eq!(filename_from_url_path("https://example.com/cat.png/"), None);
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(filename_from_url_path("https://example.com/"), None);
        assert_eq!(filename_from_url_path("https://example.com"), None);
    }

    #[test]
    fn with_query() {
        assert_eq!(
            filename_from_url_path("https://example.com/img.gif?token=abc").as_deref(),
            Some("img.gif")
        );
    }
}
