//! Fixed keyword tables the parsers classify with. Order matters: every
//! lookup returns the first entry that hits.

use denuo_core::{file_type_label, AboutSectionType};

/// Link texts that are site chrome rather than content.
pub const NAV_NOISE: &[&str] = &[
    "home", "contact", "over ons", "menu", "search", "zoeken", "next", "previous", "volgende",
    "vorige",
];

/// Position-paper title keyword and the document type it implies.
pub const DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("standpuntnota", "Standpuntnota"),
    ("memorandum", "Memorandum"),
    ("best practice", "Best Practice Guide"),
    ("voorstellen", "Voorstellen"),
    ("acties", "Actieplan"),
];

pub const DEFAULT_DOCUMENT_TYPE: &str = "Document";

pub const SECTORS: &[&str] = &["metalen", "lompen", "papier", "textiel"];

pub const PRESS_OUTLETS: &[&str] = &["De Morgen", "Het Nieuwsblad", "De Standaard", "VRT", "RTBF"];

pub const EVENT_TYPES: &[&str] = &["Workshop", "Netwerkevent", "Training", "Vergadering"];

pub const ABOUT_SECTION_KEYWORDS: &[(&str, AboutSectionType)] = &[
    ("mission", AboutSectionType::Mission),
    ("visie", AboutSectionType::Mission),
    ("team", AboutSectionType::Team),
    ("medewerkers", AboutSectionType::Team),
    ("contact", AboutSectionType::Contact),
    ("adres", AboutSectionType::Contact),
    ("governance", AboutSectionType::Governance),
    ("bestuur", AboutSectionType::Governance),
];

/// Language codes recognised as availability markers in download titles.
pub const LANGUAGE_MARKERS: &[&str] = &["NL", "FR", "EN", "DE"];

/// Navigation chrome check. Matches on substring, so "Contactformulier"
/// counts as noise too; anything shorter than three characters always does.
pub fn is_navigation_text(text: &str) -> bool {
    if text.chars().count() < 3 {
        return true;
    }
    let lower = text.to_lowercase();
    NAV_NOISE.iter().any(|word| lower.contains(word))
}

pub fn document_type_for(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    DOCUMENT_TYPES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_DOCUMENT_TYPE)
}

pub fn sector_for(title: &str) -> Option<&'static str> {
    let lower = title.to_lowercase();
    SECTORS.iter().find(|sector| lower.contains(*sector)).copied()
}

/// Outlets are matched case-sensitively; "vrt" in running text is not VRT.
pub fn press_source_for(title: &str) -> Option<&'static str> {
    PRESS_OUTLETS.iter().find(|outlet| title.contains(*outlet)).copied()
}

pub fn event_type_for(block: &str) -> Option<&'static str> {
    let lower = block.to_lowercase();
    EVENT_TYPES
        .iter()
        .find(|kind| lower.contains(&kind.to_lowercase()))
        .copied()
}

pub fn about_section_type_for(heading: &str) -> AboutSectionType {
    let lower = heading.to_lowercase();
    ABOUT_SECTION_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, kind)| *kind)
        .unwrap_or(AboutSectionType::General)
}

/// File type from the extension of the link's last path segment, ignoring
/// query string and fragment.
pub fn file_type_for_url(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or(path);
    let (_, extension) = segment.rsplit_once('.')?;
    file_type_label(extension)
}
