//! Agent-facing tools: one per catalog read operation, each with a JSON
//! input schema and a rendered text result.

use std::time::Instant;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use metrics::{counter, histogram};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use utoipa::PartialSchema;
use validator::{Validate, ValidationErrors};

use denuo_core::{
    AboutInfoArgs, ArticleDetailsArgs, EventsArgs, Language, ListArgs, NoArgs, RecentArgs, RecentNewsArgs,
    SearchCommitteesArgs, SearchDossiersArgs, SearchDownloadsArgs, SearchNewsArgs, SearchPressArgs,
    SearchStandpuntenArgs,
};
use ingest::SharedDb;

use crate::render;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    SearchNews,
    RecentNews,
    ArticleDetails,
    SearchStandpunten,
    AllStandpunten,
    SearchDossiers,
    AllDossiers,
    SearchCommittees,
    Committees,
    Events,
    SearchDownloads,
    AllDownloads,
    AboutInfo,
    SearchPress,
    RecentPress,
    ScrapeStatus,
}

fn schema_of<T: PartialSchema>() -> serde_json::Value {
    serde_json::to_value(T::schema()).unwrap_or_default()
}

impl Tool {
    pub const ALL: [Tool; 16] = [
        Tool::SearchNews,
        Tool::RecentNews,
        Tool::ArticleDetails,
        Tool::SearchStandpunten,
        Tool::AllStandpunten,
        Tool::SearchDossiers,
        Tool::AllDossiers,
        Tool::SearchCommittees,
        Tool::Committees,
        Tool::Events,
        Tool::SearchDownloads,
        Tool::AllDownloads,
        Tool::AboutInfo,
        Tool::SearchPress,
        Tool::RecentPress,
        Tool::ScrapeStatus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::SearchNews => "search_denuo_news",
            Tool::RecentNews => "get_denuo_recent_news",
            Tool::ArticleDetails => "get_denuo_article_details",
            Tool::SearchStandpunten => "search_denuo_standpunten",
            Tool::AllStandpunten => "get_all_denuo_standpunten",
            Tool::SearchDossiers => "search_denuo_dossiers",
            Tool::AllDossiers => "get_all_denuo_dossiers",
            Tool::SearchCommittees => "search_denuo_committees",
            Tool::Committees => "get_denuo_committees",
            Tool::Events => "get_denuo_events",
            Tool::SearchDownloads => "search_denuo_downloads",
            Tool::AllDownloads => "get_all_denuo_downloads",
            Tool::AboutInfo => "get_denuo_about_info",
            Tool::SearchPress => "search_denuo_press_articles",
            Tool::RecentPress => "get_denuo_recent_press_articles",
            Tool::ScrapeStatus => "get_denuo_scrape_status",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Tool::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::SearchNews => "Search Denuo news articles by keyword, language and category",
            Tool::RecentNews => "Get the most recent Denuo news articles",
            Tool::ArticleDetails => "Get the full text of one news article by ID",
            Tool::SearchStandpunten => "Search Denuo position papers (standpunten)",
            Tool::AllStandpunten => "List Denuo position papers, newest year first",
            Tool::SearchDossiers => "Search Denuo dossiers by keyword, category and language",
            Tool::AllDossiers => "List Denuo dossiers",
            Tool::SearchCommittees => "Search paritaire comités by number, name or sector",
            Tool::Committees => "List the paritaire comités Denuo follows",
            Tool::Events => "Get Denuo events, upcoming only by default",
            Tool::SearchDownloads => "Search Denuo downloads by keyword and file type",
            Tool::AllDownloads => "List Denuo downloads",
            Tool::AboutInfo => "Get information about Denuo (mission, team, contact, governance)",
            Tool::SearchPress => "Search press articles about Denuo by keyword, source and language",
            Tool::RecentPress => "Get the most recent press articles about Denuo",
            Tool::ScrapeStatus => "Show the outcome of the last scrape of each content type",
        }
    }

    pub fn input_schema(self) -> serde_json::Value {
        match self {
            Tool::SearchNews => schema_of::<SearchNewsArgs>(),
            Tool::RecentNews => schema_of::<RecentNewsArgs>(),
            Tool::ArticleDetails => schema_of::<ArticleDetailsArgs>(),
            Tool::SearchStandpunten => schema_of::<SearchStandpuntenArgs>(),
            Tool::SearchDossiers => schema_of::<SearchDossiersArgs>(),
            Tool::SearchCommittees => schema_of::<SearchCommitteesArgs>(),
            Tool::AllStandpunten | Tool::AllDossiers | Tool::Committees | Tool::AllDownloads => {
                schema_of::<ListArgs>()
            }
            Tool::Events => schema_of::<EventsArgs>(),
            Tool::SearchDownloads => schema_of::<SearchDownloadsArgs>(),
            Tool::AboutInfo => schema_of::<AboutInfoArgs>(),
            Tool::SearchPress => schema_of::<SearchPressArgs>(),
            Tool::RecentPress => schema_of::<RecentArgs>(),
            Tool::ScrapeStatus => schema_of::<NoArgs>(),
        }
    }

    /// Phrase used in "Error <doing> <what>" messages.
    fn activity(self) -> &'static str {
        match self {
            Tool::SearchNews => "searching news",
            Tool::RecentNews => "getting recent news",
            Tool::ArticleDetails => "getting article details",
            Tool::SearchStandpunten => "searching standpunten",
            Tool::AllStandpunten => "getting standpunten",
            Tool::SearchDossiers => "searching dossiers",
            Tool::AllDossiers => "getting dossiers",
            Tool::SearchCommittees => "searching committees",
            Tool::Committees => "getting committees",
            Tool::Events => "getting events",
            Tool::SearchDownloads => "searching downloads",
            Tool::AllDownloads => "getting downloads",
            Tool::AboutInfo => "getting about info",
            Tool::SearchPress => "searching press articles",
            Tool::RecentPress => "getting recent press articles",
            Tool::ScrapeStatus => "getting scrape status",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

pub fn definitions() -> Vec<ToolDefinition> {
    Tool::ALL
        .into_iter()
        .map(|tool| ToolDefinition {
            name: tool.name(),
            description: tool.description(),
            input_schema: tool.input_schema(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolOutput {
    fn text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ToolContent { kind: "text", text }],
            is_error,
        }
    }

    pub fn success(text: String) -> Self {
        Self::text(text, false)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::text(text.into(), true)
    }

    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or_default()
    }
}

pub fn validation_details(err: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = err
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| errs.iter().map(move |e| format!("{}: {}", field, e.code)))
        .collect();
    details.sort();
    details
}

/// Runs a tool against the store. Every failure, including a missing store,
/// comes back as an error output rather than an `Err`.
pub async fn invoke(db: Option<&SharedDb>, tool: Tool, args: serde_json::Value) -> ToolOutput {
    let start = Instant::now();
    counter!("tool_calls_total", "tool" => tool.name()).increment(1);

    let output = match db {
        None => {
            tracing::warn!(tool = tool.name(), "tool called without a database");
            ToolOutput::error("Database not available")
        }
        Some(db) => {
            let conn = db.lock().await;
            dispatch(&conn, tool, args, Utc::now().date_naive())
        }
    };

    if output.is_error {
        counter!("tool_errors_total", "tool" => tool.name()).increment(1);
    }
    histogram!("tool_latency_seconds", "tool" => tool.name()).record(start.elapsed().as_secs_f64());
    output
}

fn run<A, F>(tool: Tool, args: serde_json::Value, call: F) -> ToolOutput
where
    A: DeserializeOwned + Validate,
    F: FnOnce(A) -> Result<String>,
{
    let args = if args.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        args
    };
    let args: A = match serde_json::from_value(args) {
        Ok(args) => args,
        Err(e) => return ToolOutput::error(format!("Invalid arguments for {}: {e}", tool.name())),
    };
    if let Err(e) = args.validate() {
        return ToolOutput::error(format!(
            "Invalid arguments for {}: {}",
            tool.name(),
            validation_details(&e).join(", ")
        ));
    }

    match call(args) {
        Ok(text) => ToolOutput::success(text),
        Err(e) => {
            tracing::warn!(tool = tool.name(), error = %e, "tool call failed");
            ToolOutput::error(format!("Error {}: {e:#}", tool.activity()))
        }
    }
}

fn dispatch(conn: &Connection, tool: Tool, args: serde_json::Value, today: NaiveDate) -> ToolOutput {
    match tool {
        Tool::SearchNews => run(tool, args, |a: SearchNewsArgs| {
            let items =
                catalog::search_news(
                conn,
                &a.query,
                a.language.map(Language::from),
                a.category.as_deref(),
                a.limit,
            )?;
            Ok(render::news_search(&a.query, &items))
        }),
        Tool::RecentNews => run(tool, args, |a: RecentNewsArgs| {
            let items = catalog::get_recent_news(conn, a.language.map(Language::from), a.limit)?;
            Ok(render::recent_news(&items))
        }),
        Tool::ArticleDetails => run(tool, args, |a: ArticleDetailsArgs| {
            let item = catalog::get_news_by_id(conn, a.id)?;
            Ok(render::article_details(a.id, item.as_ref()))
        }),
        Tool::SearchStandpunten => run(tool, args, |a: SearchStandpuntenArgs| {
            let items = catalog::search_standpunten(conn, &a.query, a.year.as_deref(), a.limit)?;
            Ok(render::standpunten_search(&a.query, &items))
        }),
        Tool::AllStandpunten => run(tool, args, |a: ListArgs| {
            let items = catalog::get_all_standpunten(conn, a.limit)?;
            Ok(render::all_standpunten(&items))
        }),
        Tool::SearchDossiers => run(tool, args, |a: SearchDossiersArgs| {
            let items = catalog::search_dossiers(
                conn,
                &a.query,
                a.category.as_deref(),
                a.language.map(Language::from),
                a.limit,
            )?;
            Ok(render::dossiers_search(&a.query, &items))
        }),
        Tool::AllDossiers => run(tool, args, |a: ListArgs| {
            let items = catalog::get_all_dossiers(conn, a.limit)?;
            Ok(render::all_dossiers(&items))
        }),
        Tool::SearchCommittees => run(tool, args, |a: SearchCommitteesArgs| {
            let items = catalog::search_committees(conn, &a.query, a.sector.as_deref(), a.limit)?;
            Ok(render::committees_search(&a.query, &items))
        }),
        Tool::Committees => run(tool, args, |a: ListArgs| {
            let items = catalog::get_all_committees(conn, a.limit)?;
            Ok(render::committees(&items))
        }),
        Tool::Events => run(tool, args, |a: EventsArgs| {
            let items = if a.upcoming_only {
                catalog::get_upcoming_events(conn, today, a.limit)?
            } else {
                catalog::get_all_events(conn, a.limit)?
            };
            Ok(render::events(a.upcoming_only, &items))
        }),
        Tool::SearchDownloads => run(tool, args, |a: SearchDownloadsArgs| {
            let items = catalog::search_downloads(conn, &a.query, a.file_type.as_deref(), a.limit)?;
            Ok(render::downloads_search(&a.query, &items))
        }),
        Tool::AllDownloads => run(tool, args, |a: ListArgs| {
            let items = catalog::get_all_downloads(conn, a.limit)?;
            Ok(render::all_downloads(&items))
        }),
        Tool::AboutInfo => run(tool, args, |a: AboutInfoArgs| {
            let items = catalog::get_about_info(conn, a.section_type)?;
            Ok(render::about_info(a.section_type, &items))
        }),
        Tool::SearchPress => run(tool, args, |a: SearchPressArgs| {
            let items = catalog::search_press_articles(
                conn,
                &a.query,
                a.source.as_deref(),
                a.language.map(Language::from),
                a.limit,
            )?;
            Ok(render::press_search(&a.query, &items))
        }),
        Tool::RecentPress => run(tool, args, |a: RecentArgs| {
            let items = catalog::get_recent_press_articles(conn, a.limit)?;
            Ok(render::recent_press(&items))
        }),
        Tool::ScrapeStatus => run(tool, args, |_: NoArgs| {
            let rows = catalog::list_scrape_metadata(conn)?;
            Ok(render::scrape_status(&rows))
        }),
    }
}
