use once_cell::sync::Lazy;
use regex::Regex;

use denuo_core::Committee;

use crate::dedupe::dedupe;
use crate::extract::{first_href, first_text};
use crate::lexicon::sector_for;
use crate::targets::PageContext;
use crate::text::normalize;

static PSC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PSC\s+(\d+\.\d+)([^<]*)<").expect("psc regex"));

/// Href of the `<a>` element still open at `position`, if any.
fn enclosing_href(html: &str, position: usize) -> Option<&str> {
    let before = &html[..position];
    let open = before
        .rmatch_indices("<a")
        .map(|(i, _)| i)
        .find(|&i| {
            before[i + 2..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_whitespace())
        })?;
    if before[open..].contains("</a>") {
        return None;
    }
    let tag_end = html[open..].find('>').map(|i| open + i + 1)?;
    first_href(&html[open..tag_end])
}

/// Committee name: the text run after the number, or when the number sits
/// alone in its element, the next text node.
fn committee_title(html: &str, trailing: &str, after: usize) -> Option<String> {
    let title = normalize(trailing.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace()));
    if !title.is_empty() {
        return Some(title);
    }
    let next = normalize(first_text(&html[after..])?);
    if next.is_empty() || PSC_RE.is_match(&format!("{next}<")) {
        return None;
    }
    Some(next)
}

/// Parses the paritaire comités page. Committees are recognised by their
/// `PSC nnn.nn` number wherever it appears in the markup.
pub fn parse_committees(html: &str, page: &PageContext<'_>) -> Vec<Committee> {
    let mut committees = Vec::new();

    for caps in PSC_RE.captures_iter(html) {
        let (Some(whole), Some(number), Some(trailing)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        // the match ends on the `<` opening the next element
        let after = whole.end() - 1;
        let Some(title) = committee_title(html, trailing.as_str(), after) else {
            continue;
        };

        committees.push(Committee {
            psc_number: format!("PSC {}", number.as_str()),
            sector: sector_for(&title).map(str::to_string),
            title,
            description: None,
            content: None,
            url: enclosing_href(html, whole.start()).map(|href| page.resolve(href)),
        });
    }

    dedupe(committees)
}
