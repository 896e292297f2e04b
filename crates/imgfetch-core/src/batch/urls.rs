//! URL list normalization.

/// Splits a comma-delimited line into URLs: trimmed, empties dropped, order kept.
pub fn split_url_list(input: &str) -> Vec<String> {
    normalize_urls([input])
}

/// Normalizes already-split input. Each entry may itself be comma-delimited.
pub fn normalize_urls<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .flat_map(|entry| {
            entry
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}
