//! Linux-safe filename sanitization.

const NAME_MAX: usize = 255;

/// Makes a URL-derived name safe to join onto the collection directory.
///
/// - NUL, `/`, `\`, whitespace and control characters become `_`
/// - runs of `_` collapse to one
/// - leading/trailing underscores are trimmed
/// - a name made only of dots (`.`, `..`) becomes empty; other dots are kept
/// - the result is capped at 255 bytes (Linux NAME_MAX) on a char boundary
pub fn sanitize_filename_for_linux(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let c = if c == '\0' || c == '/' || c == '\\' || c.is_whitespace() || c.is_control() {
            '_'
        } else {
            c
        };
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches('_');
    if trimmed.chars().all(|c| c == '.') {
        return String::new();
    }
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut take = NAME_MAX;
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
