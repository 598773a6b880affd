use url::Url;

/// Label shown for URLs without a usable host.
pub const FALLBACK_DOMAIN: &str = "System/Other";

/// Returns the host component of `url` for display.
///
/// Malformed input, empty strings and URLs without a host (`about:blank`,
/// `file:///...`, `data:` URLs) map to [`FALLBACK_DOMAIN`].
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
        .unwrap_or_else(|| FALLBACK_DOMAIN.to_string())
}
