use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod args;
pub mod records;

pub use args::*;
pub use records::*;

pub const PROJECT_NAME: &str = "denuo";
pub const PROJECT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Origin every relative link on the scraped pages is resolved against.
pub const SITE_ORIGIN: &str = "https://denuo.be";

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus<'a> {
    pub status: &'a str,
    pub service: &'a str,
    pub version: &'a str,
    pub store: &'a str,
}

pub fn health_status(service: &'static str, store_available: bool) -> HealthStatus<'static> {
    HealthStatus {
        status: "ok",
        service,
        version: PROJECT_VERSION,
        store: if store_available { "available" } else { "unavailable" },
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse<'a> {
    pub service: &'a str,
    pub project: &'a str,
    pub version: &'a str,
}

pub fn new_run_id() -> String {
    Uuid::new_v4().to_string()
}

/// Languages a page can be scraped in. Parsers never detect language from
/// content; the page table decides which variant a page is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Nl,
    Fr,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Nl => "nl",
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "nl" => Some(Language::Nl),
            "fr" => Some(Language::Fr),
            "en" => Some(Language::En),
            _ => None,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content type; also the key of its `scrape_metadata` row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    News,
    Standpunten,
    Dossiers,
    Committees,
    Events,
    Downloads,
    AboutInfo,
    PressArticles,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::News,
        Section::Standpunten,
        Section::Dossiers,
        Section::Committees,
        Section::Events,
        Section::Downloads,
        Section::AboutInfo,
        Section::PressArticles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::News => "news",
            Section::Standpunten => "standpunten",
            Section::Dossiers => "dossiers",
            Section::Committees => "committees",
            Section::Events => "events",
            Section::Downloads => "downloads",
            Section::AboutInfo => "about_info",
            Section::PressArticles => "press_articles",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("NL"), Some(Language::Nl));
        assert_eq!(Language::from_code(" fr "), Some(Language::Fr));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn section_names_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_name(section.as_str()), Some(section));
        }
        assert_eq!(Section::from_name("partners"), None);
    }

    #[test]
    fn language_serializes_lowercase() {
        let json = serde_json::to_string(&Language::Fr).unwrap();
        assert_eq!(json, "\"fr\"");
    }
}
