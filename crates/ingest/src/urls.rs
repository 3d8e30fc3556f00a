use once_cell::sync::Lazy;
use regex::Regex;

static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("scheme regex"));

/// Makes a link found on a page absolute against `origin`.
///
/// No percent-encoding or query normalization is applied; two spellings of the
/// same link stay two natural keys.
pub fn resolve(reference: &str, origin: &str) -> String {
    let reference = reference.trim();
    if SCHEME_RE.is_match(reference) {
        return reference.to_string();
    }

    let origin = origin.trim_end_matches('/');
    if let Some(rest) = reference.strip_prefix("//") {
        // protocol-relative: borrow the origin's scheme
        let scheme = origin.split("://").next().unwrap_or("https");
        return format!("{scheme}://{rest}");
    }
    if reference.starts_with('/') {
        return format!("{origin}{reference}");
    }
    format!("{origin}/{reference}")
}
