//! Regex-level extraction primitives shared by the section parsers. None of
//! these build a DOM; they work on the raw markup the site serves.

use once_cell::sync::Lazy;
use regex::Regex;

static ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*"([^"]*)"[^>]*>(.*?)</a>"#).expect("anchor regex")
});
static TEXT_NODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">([^<]+)<").expect("text node regex"));
static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("bracket regex"));
static HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)href\s*=\s*"([^"]*)""#).expect("href regex"));

/// An `<a href>` element: the raw href and the markup between the tags.
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    pub href: &'a str,
    pub inner: &'a str,
    pub markup: &'a str,
}

impl<'a> Anchor<'a> {
    /// Links that never point at content.
    pub fn is_skippable(&self) -> bool {
        let href = self.href.trim();
        href.is_empty()
            || href.to_ascii_lowercase().starts_with("mailto:")
            || href.to_ascii_lowercase().contains("javascript:")
    }

    /// The first non-blank text node inside the anchor.
    pub fn text(&self) -> Option<&'a str> {
        first_text(self.inner)
    }
}

pub fn anchors(fragment: &str) -> impl Iterator<Item = Anchor<'_>> {
    ANCHOR_RE.captures_iter(fragment).filter_map(|caps| {
        Some(Anchor {
            href: caps.get(1)?.as_str(),
            inner: caps.get(2)?.as_str(),
            markup: caps.get(0)?.as_str(),
        })
    })
}

/// First capture group of the first match.
pub fn first_match<'a>(fragment: &'a str, pattern: &Regex) -> Option<&'a str> {
    pattern
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// For every match of `pattern`, the text between the last `>` at or before
/// the capture and the next `<` after it. Blank runs are skipped.
pub fn all_matches<'a>(fragment: &'a str, pattern: &Regex) -> Vec<&'a str> {
    let mut out = Vec::new();
    for caps in pattern.captures_iter(fragment) {
        let Some(anchor) = caps.get(1).or_else(|| caps.get(0)) else {
            continue;
        };
        let from = fragment[..anchor.start()]
            .rfind('>')
            .map(|i| i + 1)
            .unwrap_or(anchor.start());
        let to = fragment[from..]
            .find('<')
            .map(|i| from + i)
            .unwrap_or(fragment.len());
        let text = fragment[from..to].trim();
        if !text.is_empty() {
            out.push(text);
        }
    }
    out
}

/// The first text node with visible characters. A fragment that opens with
/// plain text counts that text as its first node.
pub fn first_text(fragment: &str) -> Option<&str> {
    let leading = fragment.split('<').next().unwrap_or("").trim();
    if !leading.is_empty() {
        return Some(leading);
    }
    TEXT_NODE_RE
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|text| !text.is_empty())
}

/// Every `[token]` in the fragment, trimmed, in order of appearance.
pub fn bracket_tokens(fragment: &str) -> Vec<String> {
    BRACKET_RE
        .captures_iter(fragment)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// The first `href="…"` attribute value in the fragment.
pub fn first_href(fragment: &str) -> Option<&str> {
    first_match(fragment, &HREF_RE).filter(|href| !href.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_text_skips_blank_nodes() {
        let html = "<a href=\"/x\">\n  <span class=\"icon\"></span>\n  <span>Werkbaar werk</span></a>";
        assert_eq!(first_text(html), Some("Werkbaar werk"));
        assert_eq!(first_text("Loonbeleid <em>2024</em>"), Some("Loonbeleid"));
        assert_eq!(first_text("<div> </div>"), None);
    }

    #[test]
    fn anchors_capture_href_and_inner() {
        let html = r#"<ul><li><a class="link" href="/nl/a">Eerste</a></li>
            <li><a href="mailto:info@denuo.be">Mail</a></li>
            <li><abbr href="/nope">x</abbr></li></ul>"#;
        let found: Vec<_> = anchors(html).collect();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].href, "/nl/a");
        assert_eq!(found[0].text(), Some("Eerste"));
        assert!(!found[0].is_skippable());
        assert!(found[1].is_skippable());
    }

    #[test]
    fn javascript_links_are_skippable() {
        let html = r#"<a href="JavaScript:void(0)">Open</a>"#;
        assert!(anchors(html).next().unwrap().is_skippable());
    }

    #[test]
    fn bracket_tokens_in_order() {
        assert_eq!(
            bracket_tokens("Loonbeleid [Sociaal] [ Fiscaal ] []"),
            vec!["Sociaal".to_string(), "Fiscaal".to_string()]
        );
    }

    #[test]
    fn all_matches_returns_surrounding_text_runs() {
        let pattern = Regex::new(r">([^<]+)<").unwrap();
        let html = "<p>Eerste alinea</p>\n<p>Tweede</p>";
        assert_eq!(all_matches(html, &pattern), vec!["Eerste alinea", "Tweede"]);
    }

    #[test]
    fn first_match_group() {
        let pattern = Regex::new(r"\((\d{4})\)").unwrap();
        assert_eq!(first_match("Nota (2023) en (2024)", &pattern), Some("2023"));
        assert_eq!(first_match("Nota", &pattern), None);
    }

    #[test]
    fn first_href_ignores_empty() {
        assert_eq!(first_href(r#"<div><a href="">x</a><a href="/y">y</a></div>"#), None);
        assert_eq!(first_href(r#"<div><a href="/y">y</a></div>"#), Some("/y"));
    }
}
