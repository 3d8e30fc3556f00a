//! Argument types of the agent-facing tools. Each one deserializes from the
//! tool call's JSON arguments, validates with `validator`, and describes its
//! own input schema through `utoipa`.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{AboutSectionType, Language};

/// Language filter the tools accept. Content is only published in Dutch and
/// French.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFilter {
    Nl,
    Fr,
}

impl From<LanguageFilter> for Language {
    fn from(filter: LanguageFilter) -> Self {
        match filter {
            LanguageFilter::Nl => Language::Nl,
            LanguageFilter::Fr => Language::Fr,
        }
    }
}

/// Rejects queries with nothing but whitespace, which would match every row.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn limit_5() -> u32 {
    5
}

fn limit_10() -> u32 {
    10
}

fn limit_20() -> u32 {
    20
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchNewsArgs {
    /// Search term for news articles
    #[validate(custom(function = "not_blank"))]
    pub query: String,
    /// Language filter
    #[schema(inline)]
    pub language: Option<LanguageFilter>,
    /// Category filter
    pub category: Option<String>,
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecentNewsArgs {
    /// Language filter
    #[schema(inline)]
    pub language: Option<LanguageFilter>,
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ArticleDetailsArgs {
    /// Article ID
    #[validate(range(min = 1))]
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchStandpuntenArgs {
    /// Search term for position papers
    #[validate(custom(function = "not_blank"))]
    pub query: String,
    /// Publication year filter
    pub year: Option<String>,
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

/// Plain listing with a default page size of 20.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ListArgs {
    /// Maximum number of results
    #[serde(default = "limit_20")]
    #[schema(default = 20, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecentArgs {
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchDossiersArgs {
    /// Search term for dossiers
    #[validate(custom(function = "not_blank"))]
    pub query: String,
    /// Category filter
    pub category: Option<String>,
    /// Language filter
    #[schema(inline)]
    pub language: Option<LanguageFilter>,
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchCommitteesArgs {
    /// Search term for paritaire comités (number or name)
    #[validate(custom(function = "not_blank"))]
    pub query: String,
    /// Sector filter (e.g. metalen, textiel)
    pub sector: Option<String>,
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EventsArgs {
    /// Show only upcoming events
    #[serde(default = "yes")]
    #[schema(default = true)]
    pub upcoming_only: bool,
    /// Maximum number of results
    #[serde(default = "limit_5")]
    #[schema(default = 5, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchDownloadsArgs {
    /// Search term for downloads
    #[validate(custom(function = "not_blank"))]
    pub query: String,
    /// File type filter (e.g., pdf, doc)
    pub file_type: Option<String>,
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AboutInfoArgs {
    /// Section type filter (e.g., mission, contact, team)
    #[schema(inline)]
    pub section_type: Option<AboutSectionType>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchPressArgs {
    /// Search term for press articles
    #[validate(custom(function = "not_blank"))]
    pub query: String,
    /// Source filter (e.g., 'De Morgen')
    pub source: Option<String>,
    /// Language filter
    #[schema(inline)]
    pub language: Option<LanguageFilter>,
    /// Maximum number of results
    #[serde(default = "limit_10")]
    #[schema(default = 10, minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100))]
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NoArgs {}
