use once_cell::sync::Lazy;
use regex::Regex;

use denuo_core::Download;

use crate::dedupe::dedupe;
use crate::extract::{anchors, bracket_tokens};
use crate::lexicon::{file_type_for_url, is_navigation_text, LANGUAGE_MARKERS};
use crate::targets::PageContext;
use crate::text::{char_len, normalize};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z]{2}\b").expect("word regex"));

const MIN_TITLE_CHARS: usize = 6;

/// Language markers (`NL`, `FR`, …) printed in a download title, in order and
/// without repeats.
fn languages_in(title: &str) -> Option<Vec<String>> {
    let mut found: Vec<String> = Vec::new();
    for word in WORD_RE.find_iter(title) {
        let word = word.as_str();
        if LANGUAGE_MARKERS.contains(&word) && !found.iter().any(|f| f == word) {
            found.push(word.to_string());
        }
    }
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

pub fn parse_downloads(html: &str, page: &PageContext<'_>) -> Vec<Download> {
    let mut downloads = Vec::new();

    for anchor in anchors(html) {
        if anchor.is_skippable() {
            continue;
        }
        let Some(title) = anchor.text().map(normalize) else {
            continue;
        };
        if char_len(&title) < MIN_TITLE_CHARS || is_navigation_text(&title) {
            continue;
        }

        let download_url = page.resolve(anchor.href);
        downloads.push(Download {
            file_type: file_type_for_url(&download_url).map(str::to_string),
            languages_available: languages_in(&title),
            title,
            description: None,
            download_url,
            page_url: Some(page.url.to_string()),
            categories: bracket_tokens(anchor.markup),
        });
    }

    dedupe(downloads)
}
