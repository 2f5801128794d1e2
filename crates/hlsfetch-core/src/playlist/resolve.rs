//! Segment reference extraction and URL resolution.

use super::error::PlaylistError;
use url::Url;

/// Parses `base` and checks it has a scheme, a host and a path ending in `/`.
///
/// Without the trailing `/`, joining would replace the last path component and
/// fetch every segment from the parent directory.
pub fn validate_base_url(base: &str) -> Result<Url, PlaylistError> {
    let invalid = |reason: String| PlaylistError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };
    let parsed = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;
    if parsed.cannot_be_a_base() || parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    if !parsed.path().ends_with('/') {
        return Err(invalid("must end with '/'".to_string()));
    }
    Ok(parsed)
}

/// Returns `(line_number, reference)` for every segment reference in `index_text`,
/// in document order. Line numbers are 1-based.
pub fn segment_references(index_text: &str) -> Vec<(usize, &str)> {
    index_text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_start_matches('\u{feff}').trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Appends `extra` to the query string of `url`. A leading `?` or `&` in
/// `extra` is ignored; an existing query is kept and extended with `&`.
pub fn append_extra_params(url: &mut Url, extra: &str) {
    let extra = extra.trim().trim_start_matches(|c| c == '?' || c == '&');
    if extra.is_empty() {
        return;
    }
    let query = match url.query() {
        Some(q) if !q.is_empty() => format!("{}&{}", q, extra),
        _ => extra.to_string(),
    };
    url.set_query(Some(&query));
}

/// Resolves every segment reference in `index_text` against `base_url`,
/// appending `extra_params` to each. Output order equals line order.
///
/// No network access. Fails with `InvalidBaseUrl` before looking at the index
/// if the base lacks a scheme or host.
pub fn resolve(
    base_url: &str,
    index_text: &str,
    extra_params: &str,
) -> Result<Vec<Url>, PlaylistError> {
    let base = validate_base_url(base_url)?;
    resolve_against(&base, index_text, extra_params)
}

/// Like `resolve`, for a base URL that was already validated.
pub fn resolve_against(
    base: &Url,
    index_text: &str,
    extra_params: &str,
) -> Result<Vec<Url>, PlaylistError> {
    segment_references(index_text)
        .into_iter()
        .map(|(line, reference)| {
            let mut url = base
                .join(reference)
                .map_err(|source| PlaylistError::InvalidReference {
                    line,
                    reference: reference.to_string(),
                    source,
                })?;
            append_extra_params(&mut url, extra_params);
            Ok(url)
        })
        .collect()
}
