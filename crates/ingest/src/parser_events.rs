use once_cell::sync::Lazy;
use regex::Regex;

use denuo_core::Event;

use crate::extract::{first_href, first_match, first_text};
use crate::lexicon::event_type_for;
use crate::targets::PageContext;
use crate::text::{char_len, normalize, normalize_opt};

static KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)workshop|netwerkevent|training").expect("event keyword regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>").expect("heading regex"));
static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("paragraph regex"));
static WRITTEN_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}\s+\w+\s+\d{4})\b").expect("written date regex"));
static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{4})\b").expect("numeric date regex"));
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}[.:]\d{2}\s*-\s*\d{1,2}[.:]\d{2})").expect("time range regex")
});
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)(?:locatie|venue|plaats)[^:<]*:\s*(?:</[^>]+>\s*)*([^<]+)").expect("location regex")
});

const MIN_TITLE_CHARS: usize = 6;
const MIN_DESCRIPTION_CHARS: usize = 21;

/// Byte range of the block around a keyword hit: from the last `<div` before
/// it to the first `</div>` after it.
fn block_around(html: &str, hit_start: usize, hit_end: usize) -> Option<(usize, usize)> {
    let start = html[..hit_start].rfind("<div")?;
    let end = html[hit_end..].find("</div>")? + hit_end + "</div>".len();
    Some((start, end))
}

fn title_of(block: &str) -> Option<String> {
    first_match(block, &HEADING_RE)
        .and_then(normalize_opt)
        .or_else(|| first_text(block).and_then(normalize_opt))
}

fn description_of(block: &str) -> Option<String> {
    PARAGRAPH_RE
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| normalize(m.as_str()))
        .find(|text| char_len(text) >= MIN_DESCRIPTION_CHARS)
}

/// Location label and address, split on the first comma.
/// A written date anywhere in the block wins over a numeric one.
fn date_of(text: &str) -> Option<String> {
    first_match(text, &WRITTEN_DATE_RE)
        .or_else(|| first_match(text, &NUMERIC_DATE_RE))
        .map(str::to_string)
}

fn location_of(block: &str) -> (Option<String>, Option<String>) {
    let Some(raw) = first_match(block, &LOCATION_RE).and_then(normalize_opt) else {
        return (None, None);
    };
    match raw.split_once(',') {
        Some((name, address)) => (normalize_opt(name), normalize_opt(address)),
        None => (Some(raw), None),
    }
}

/// Parses the agenda. The page has no per-event container, so each keyword
/// hit (workshop, netwerkevent, training) anchors a `<div>` block that is
/// read as one event. Events have no natural key and are not deduplicated.
pub fn parse_events(html: &str, page: &PageContext<'_>) -> Vec<Event> {
    let mut events = Vec::new();
    let mut position = 0;

    while let Some(hit) = KEYWORD_RE.find_at(html, position) {
        let Some((start, end)) = block_around(html, hit.start(), hit.end()) else {
            position = hit.end();
            continue;
        };
        position = end;
        let block = &html[start..end];

        let Some(title) = title_of(block) else {
            continue;
        };
        if char_len(&title) < MIN_TITLE_CHARS {
            continue;
        }

        let text = normalize(block);
        let (location_name, location_address) = location_of(block);

        events.push(Event {
            title,
            description: description_of(block),
            event_type: event_type_for(block).map(str::to_string),
            event_date: date_of(&text),
            event_time: first_match(&text, &TIME_RE).map(str::to_string),
            location_name,
            location_address,
            url: first_href(block).map(|href| page.resolve(href)),
            language: page.language,
        });
    }

    events
}
