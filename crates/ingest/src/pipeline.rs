//! One scrape run: fetch every page concurrently, parse, merge per section,
//! store every batch, record the outcome per section.

use futures::future::join_all;
use rusqlite::Connection;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::Instrument;

use denuo_core::{
    new_run_id, AboutSection, Committee, Dossier, Download, Event, NewsItem, PositionPaper,
    PressArticle, ScrapeStatus, Section,
};

use crate::config::ScrapeConfig;
use crate::dedupe::dedupe;
use crate::fetcher::{build_client, fetch_page};
use crate::parser_about::parse_about;
use crate::parser_committees::parse_committees;
use crate::parser_downloads::parse_downloads;
use crate::parser_dossiers::parse_dossiers;
use crate::parser_events::parse_events;
use crate::parser_news::parse_news;
use crate::parser_press::parse_press_articles;
use crate::parser_standpunten::parse_standpunten;
use crate::store;
use crate::targets::{PageContext, ScrapeTarget, TARGETS};

/// Parsed records of one section.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    News(Vec<NewsItem>),
    Standpunten(Vec<PositionPaper>),
    Dossiers(Vec<Dossier>),
    Committees(Vec<Committee>),
    Events(Vec<Event>),
    Downloads(Vec<Download>),
    AboutInfo(Vec<AboutSection>),
    PressArticles(Vec<PressArticle>),
}

impl Batch {
    pub fn empty(section: Section) -> Self {
        match section {
            Section::News => Batch::News(Vec::new()),
            Section::Standpunten => Batch::Standpunten(Vec::new()),
            Section::Dossiers => Batch::Dossiers(Vec::new()),
            Section::Committees => Batch::Committees(Vec::new()),
            Section::Events => Batch::Events(Vec::new()),
            Section::Downloads => Batch::Downloads(Vec::new()),
            Section::AboutInfo => Batch::AboutInfo(Vec::new()),
            Section::PressArticles => Batch::PressArticles(Vec::new()),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Batch::News(_) => Section::News,
            Batch::Standpunten(_) => Section::Standpunten,
            Batch::Dossiers(_) => Section::Dossiers,
            Batch::Committees(_) => Section::Committees,
            Batch::Events(_) => Section::Events,
            Batch::Downloads(_) => Section::Downloads,
            Batch::AboutInfo(_) => Section::AboutInfo,
            Batch::PressArticles(_) => Section::PressArticles,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Batch::News(items) => items.len(),
            Batch::Standpunten(items) => items.len(),
            Batch::Dossiers(items) => items.len(),
            Batch::Committees(items) => items.len(),
            Batch::Events(items) => items.len(),
            Batch::Downloads(items) => items.len(),
            Batch::AboutInfo(items) => items.len(),
            Batch::PressArticles(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends another page's records of the same section. Kinds with a
    /// natural key are deduplicated again across the merged pages.
    fn merge(&mut self, other: Batch) {
        match (self, other) {
            (Batch::News(items), Batch::News(more)) => {
                items.extend(more);
                *items = dedupe(std::mem::take(items));
            }
            (Batch::Standpunten(items), Batch::Standpunten(more)) => {
                items.extend(more);
                *items = dedupe(std::mem::take(items));
            }
            (Batch::Dossiers(items), Batch::Dossiers(more)) => {
                items.extend(more);
                *items = dedupe(std::mem::take(items));
            }
            (Batch::Committees(items), Batch::Committees(more)) => {
                items.extend(more);
                *items = dedupe(std::mem::take(items));
            }
            (Batch::Downloads(items), Batch::Downloads(more)) => {
                items.extend(more);
                *items = dedupe(std::mem::take(items));
            }
            (Batch::PressArticles(items), Batch::PressArticles(more)) => {
                items.extend(more);
                *items = dedupe(std::mem::take(items));
            }
            (Batch::Events(items), Batch::Events(more)) => items.extend(more),
            (Batch::AboutInfo(items), Batch::AboutInfo(more)) => items.extend(more),
            (batch, other) => {
                tracing::error!(
                    into = %batch.section(),
                    from = %other.section(),
                    "refusing to merge batches of different sections"
                );
            }
        }
    }

    fn store(&self, conn: &Connection) -> anyhow::Result<usize> {
        match self {
            Batch::News(items) => store::store_news(conn, items),
            Batch::Standpunten(items) => store::store_standpunten(conn, items),
            Batch::Dossiers(items) => store::store_dossiers(conn, items),
            Batch::Committees(items) => store::store_committees(conn, items),
            Batch::Events(items) => store::store_events(conn, items),
            Batch::Downloads(items) => store::store_downloads(conn, items),
            Batch::AboutInfo(items) => store::store_about_info(conn, items),
            Batch::PressArticles(items) => store::store_press_articles(conn, items),
        }
    }
}

/// Runs the section's parser over one fetched page.
pub fn parse_page(target: &ScrapeTarget, html: &str, origin: &str) -> Batch {
    let url = target.url(origin);
    let page = PageContext {
        origin,
        url: &url,
        language: target.language,
    };
    let batch = match target.section {
        Section::News => Batch::News(parse_news(html, &page)),
        Section::Standpunten => Batch::Standpunten(parse_standpunten(html, &page)),
        Section::Dossiers => Batch::Dossiers(parse_dossiers(html, &page)),
        Section::Committees => Batch::Committees(parse_committees(html, &page)),
        Section::Events => Batch::Events(parse_events(html, &page)),
        Section::Downloads => Batch::Downloads(parse_downloads(html, &page)),
        Section::AboutInfo => Batch::AboutInfo(parse_about(html, &page)),
        Section::PressArticles => Batch::PressArticles(parse_press_articles(html, &page)),
    };
    tracing::info!(
        section = %target.section,
        language = %target.language,
        count = batch.len(),
        "parsed page"
    );
    batch
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub section: Section,
    pub status: ScrapeStatus,
    /// Records parsed for the section, stored or not.
    pub items: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeReport {
    pub run_id: String,
    pub total_items: usize,
    pub sections: Vec<SectionReport>,
}

impl ScrapeReport {
    pub fn failed_sections(&self) -> impl Iterator<Item = &SectionReport> {
        self.sections
            .iter()
            .filter(|s| s.status == ScrapeStatus::Failed)
    }
}

struct SectionOutcome {
    batch: Batch,
    errors: Vec<String>,
}

/// Performs one full scrape run. Never fails: every fetch, parse or store
/// problem ends up in the section's metadata row and in the report.
pub async fn run_scrape(db: &Mutex<Connection>, config: &ScrapeConfig) -> ScrapeReport {
    let run_id = new_run_id();
    let span = tracing::info_span!("scrape_run", run_id = %run_id);
    run_scrape_inner(db, config, run_id).instrument(span).await
}

async fn run_scrape_inner(db: &Mutex<Connection>, config: &ScrapeConfig, run_id: String) -> ScrapeReport {
    tracing::info!(base_url = %config.base_url, pages = TARGETS.len(), "starting scrape run");

    let mut outcomes: Vec<SectionOutcome> = Section::ALL
        .iter()
        .map(|&section| SectionOutcome {
            batch: Batch::empty(section),
            errors: Vec::new(),
        })
        .collect();

    match build_client(config) {
        Ok(client) => {
            let fetches = TARGETS.iter().map(|target| {
                let client = &client;
                async move {
                    let url = target.url(&config.base_url);
                    (target, fetch_page(client, &url).await)
                }
            });

            for (target, fetched) in join_all(fetches).await {
                let Some(outcome) = outcomes
                    .iter_mut()
                    .find(|o| o.batch.section() == target.section)
                else {
                    continue;
                };
                match fetched {
                    Ok(html) => outcome.batch.merge(parse_page(target, &html, &config.base_url)),
                    Err(e) => {
                        tracing::warn!(
                            section = %target.section,
                            language = %target.language,
                            error = %e,
                            "page fetch failed"
                        );
                        outcome.errors.push(format!("{e:#}"));
                    }
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "cannot build HTTP client, every section fails");
            for outcome in &mut outcomes {
                outcome.errors.push(format!("{e:#}"));
            }
        }
    }

    let sections = join_all(outcomes.into_iter().map(|o| store_outcome(db, o))).await;
    let total_items = sections.iter().map(|s| s.items).sum();
    let failed = sections
        .iter()
        .filter(|s| s.status == ScrapeStatus::Failed)
        .count();
    tracing::info!(total_items, failed_sections = failed, "scrape run finished");

    ScrapeReport {
        run_id,
        total_items,
        sections,
    }
}

async fn store_outcome(db: &Mutex<Connection>, outcome: SectionOutcome) -> SectionReport {
    let SectionOutcome { batch, mut errors } = outcome;
    let section = batch.section();
    let items = batch.len();
    let conn = db.lock().await;

    let mut stored = 0;
    if !batch.is_empty() {
        match batch.store(&conn) {
            Ok(count) => stored = count,
            Err(e) => {
                tracing::error!(section = %section, error = %e, "failed to store batch");
                errors.push(format!("store failed: {e:#}"));
            }
        }
    }

    if errors.is_empty() {
        return SectionReport {
            section,
            status: ScrapeStatus::Success,
            items,
            error: None,
        };
    }

    let message = errors.join("; ");
    if let Err(e) =
        store::update_scrape_metadata(&conn, section, ScrapeStatus::Failed, stored, Some(&message))
    {
        tracing::error!(section = %section, error = %e, "failed to record failed scrape");
    }
    SectionReport {
        section,
        status: ScrapeStatus::Failed,
        items,
        error: Some(message),
    }
}
