use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{Language, Section};

/// Summary placed on news items whose teaser carries the restricted marker.
pub const RESTRICTED_SUMMARY: &str = "Restricted content - Login required";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewsItem {
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub category: Option<String>,
    pub publication_date: Option<String>,
    pub language: Language,
}

/// A standpunt: position paper published as a PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PositionPaper {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub publication_year: Option<String>,
    pub document_type: Option<String>,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Dossier {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub categories: Vec<String>,
    pub language: Language,
}

/// Paritair comité, keyed by its number (`PSC 142.01`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Committee {
    pub psc_number: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub sector: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub title: String,
    pub description: Option<String>,
    pub event_type: Option<String>,
    /// Free-form, as printed on the page ("12 maart 2025", "12/03/2025").
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub url: Option<String>,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Download {
    pub title: String,
    pub description: Option<String>,
    pub file_type: Option<String>,
    pub download_url: String,
    pub page_url: Option<String>,
    pub categories: Vec<String>,
    pub languages_available: Option<Vec<String>>,
}

/// File extension and the file type label a download is listed under.
pub const FILE_TYPES: &[(&str, &str)] = &[
    ("pdf", "PDF"),
    ("doc", "Word"),
    ("docx", "Word"),
    ("xls", "Excel"),
    ("xlsx", "Excel"),
    ("ppt", "PowerPoint"),
    ("pptx", "PowerPoint"),
];

pub fn file_type_label(extension: &str) -> Option<&'static str> {
    let lower = extension.trim().trim_start_matches('.').to_lowercase();
    FILE_TYPES
        .iter()
        .find(|(ext, _)| *ext == lower)
        .map(|(_, label)| *label)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AboutSectionType {
    Mission,
    Team,
    Contact,
    Governance,
    General,
}

impl AboutSectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AboutSectionType::Mission => "mission",
            AboutSectionType::Team => "team",
            AboutSectionType::Contact => "contact",
            AboutSectionType::Governance => "governance",
            AboutSectionType::General => "general",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mission" => Some(AboutSectionType::Mission),
            "team" => Some(AboutSectionType::Team),
            "contact" => Some(AboutSectionType::Contact),
            "governance" => Some(AboutSectionType::Governance),
            "general" => Some(AboutSectionType::General),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AboutSection {
    pub section_title: String,
    pub content: String,
    pub section_type: AboutSectionType,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PressArticle {
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub categories: Vec<String>,
    pub publication_date: Option<String>,
    pub source: Option<String>,
    pub language: Language,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    Success,
    Failed,
}

impl ScrapeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrapeStatus::Success => "success",
            ScrapeStatus::Failed => "failed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "success" => Some(ScrapeStatus::Success),
            "failed" => Some(ScrapeStatus::Failed),
            _ => None,
        }
    }
}

/// Outcome of the most recent scrape of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScrapeMetadata {
    pub section: Section,
    pub last_scraped: String,
    pub status: ScrapeStatus,
    pub items_scraped: i64,
    pub error_message: Option<String>,
}

/// A record as read back from the store, with its surrogate id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: i64,
    #[serde(flatten)]
    pub record: T,
    pub scraped_at: String,
    pub updated_at: String,
}

impl<T> std::ops::Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

/// Key used to deduplicate within a parse pass and to upsert across runs.
pub trait NaturalKey {
    fn natural_key(&self) -> &str;
}

impl NaturalKey for NewsItem {
    fn natural_key(&self) -> &str {
        &self.url
    }
}

impl NaturalKey for PositionPaper {
    fn natural_key(&self) -> &str {
        &self.url
    }
}

impl NaturalKey for Dossier {
    fn natural_key(&self) -> &str {
        &self.url
    }
}

impl NaturalKey for Committee {
    fn natural_key(&self) -> &str {
        &self.psc_number
    }
}

impl NaturalKey for Download {
    fn natural_key(&self) -> &str {
        &self.download_url
    }
}

impl NaturalKey for PressArticle {
    fn natural_key(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_flattens_record() {
        let stored = Stored {
            id: 7,
            record: Committee {
                psc_number: "PSC 142.01".to_string(),
                title: "Terugwinning van metalen".to_string(),
                description: None,
                content: None,
                url: None,
                sector: Some("metalen".to_string()),
            },
            scraped_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["psc_number"], "PSC 142.01");
        assert_eq!(stored.sector.as_deref(), Some("metalen"));
    }

    #[test]
    fn file_type_labels() {
        assert_eq!(file_type_label("docx"), Some("Word"));
        assert_eq!(file_type_label(".PDF"), Some("PDF"));
        assert_eq!(file_type_label("zip"), None);
    }

    #[test]
    fn section_type_names() {
        assert_eq!(AboutSectionType::from_name("Team"), Some(AboutSectionType::Team));
        assert_eq!(AboutSectionType::General.as_str(), "general");
        assert_eq!(AboutSectionType::from_name("partners"), None);
    }
}
