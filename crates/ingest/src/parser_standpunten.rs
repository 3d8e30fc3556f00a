use once_cell::sync::Lazy;
use regex::Regex;

use denuo_core::PositionPaper;

use crate::dedupe::dedupe;
use crate::extract::first_match;
use crate::lexicon::document_type_for;
use crate::targets::PageContext;
use crate::text::{char_len, normalize};

static PDF_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*"([^"]*\.pdf)"[^>]*>(.*?)</a>"#).expect("pdf link regex")
});
static TITLE_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<div[^>]*class="[^"]*field--name-field-title[^"]*"[^>]*>([^<]+)</div>"#)
        .expect("title field regex")
});
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d{4})\)").expect("year regex"));

const MIN_TITLE_CHARS: usize = 6;

/// Splits `"Titel (2023)"` into the title without the parenthetical and the
/// year. Only the first `(dddd)` counts.
pub fn split_year(raw_title: &str) -> (String, Option<String>) {
    match YEAR_RE.captures(raw_title) {
        Some(caps) => {
            let year = caps.get(1).map(|m| m.as_str().to_string());
            let title = normalize(&YEAR_RE.replacen(raw_title, 1, " "));
            (title, year)
        }
        None => (normalize(raw_title), None),
    }
}

/// Parses the standpunten page: every PDF link carrying a title field.
pub fn parse_standpunten(html: &str, page: &PageContext<'_>) -> Vec<PositionPaper> {
    let mut papers = Vec::new();

    for caps in PDF_LINK_RE.captures_iter(html) {
        let (Some(href), Some(inner)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let href = href.as_str();
        if href.to_ascii_lowercase().contains("javascript:") {
            continue;
        }
        let Some(raw_title) = first_match(inner.as_str(), &TITLE_FIELD_RE) else {
            continue;
        };

        let (title, year) = split_year(&normalize(raw_title));
        if char_len(&title) < MIN_TITLE_CHARS {
            continue;
        }

        let document_type = document_type_for(&title);
        let description = match &year {
            Some(year) => format!("{document_type} uit {year}"),
            None => document_type.to_string(),
        };

        papers.push(PositionPaper {
            title,
            description: Some(description),
            content: None,
            url: page.resolve(href),
            publication_year: year,
            document_type: Some(document_type.to_string()),
            language: page.language,
        });
    }

    dedupe(papers)
}
