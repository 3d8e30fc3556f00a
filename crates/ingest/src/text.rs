use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(amp|lt|gt|quot|#039|nbsp);").expect("entity regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Turns a markup fragment into plain text: tags removed, the handful of
/// entities the site emits decoded, whitespace collapsed and trimmed.
///
/// Decoding can expose new markup or entities (`&amp;lt;b&amp;gt;`), so the
/// pass repeats until the text is stable. Every pass that changes anything
/// makes the text shorter, which bounds the loop and makes the function
/// idempotent.
pub fn normalize(fragment: &str) -> String {
    let mut current = normalize_once(fragment);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, "");
    let decoded = ENTITY_RE.replace_all(&stripped, |caps: &regex::Captures| {
        match &caps[1] {
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "#039" => "'",
            _ => " ",
        }
    });
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// `normalize`, mapping an empty result to `None`.
pub fn normalize_opt(fragment: &str) -> Option<String> {
    let text = normalize(fragment);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Length in characters, as the site's length thresholds are meant.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
