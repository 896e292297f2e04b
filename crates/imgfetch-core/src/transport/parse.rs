//! Parse HTTP response header lines.

use super::ResponseHeaders;

/// Parse a status line such as `HTTP/1.1 404 Not Found` into (code, reason).
pub fn parse_status_line(line: &str) -> Option<(u32, String)> {
    let line = line.trim();
    if !line.starts_with("HTTP/") {
        return None;
    }
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next()?;
    let code = parts.next()?.trim().parse::<u32>().ok()?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Some((code, reason))
}

/// Parse collected header lines of a single response.
///
/// Names are matched case-insensitively; a non-numeric `Content-Length` is
/// treated as absent.
pub fn parse_headers(lines: &[String]) -> ResponseHeaders {
    let mut headers = ResponseHeaders::default();

    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.eq_ignore_ascii_case("content-type") {
            headers.content_type = Some(value.to_string());
        } else if name.eq_ignore_ascii_case("content-length") {
            headers.content_length = value.parse::<u64>().ok();
        }
    }

    headers
}
