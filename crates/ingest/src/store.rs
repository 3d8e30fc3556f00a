//! Write side of the store: natural-key upserts per record kind and the
//! per-section scrape outcome.

use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use denuo_core::{
    AboutSection, Committee, Dossier, Download, Event, NewsItem, PositionPaper, PressArticle,
    ScrapeStatus, Section,
};

/// A record kind with a table, its column order, and the columns that
/// identify an existing row.
pub trait Upsert {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    const KEY: &'static [&'static str];

    /// Column values in `COLUMNS` order.
    fn values(&self) -> Result<Vec<Value>>;
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn opt_text(value: Option<&str>) -> Value {
    value.map(text).unwrap_or(Value::Null)
}

fn json_list(values: &[String]) -> Result<Value> {
    Ok(Value::Text(
        serde_json::to_string(values).context("failed to encode list column")?,
    ))
}

impl Upsert for NewsItem {
    const TABLE: &'static str = "news";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "summary",
        "content",
        "url",
        "category",
        "publication_date",
        "language",
    ];
    const KEY: &'static [&'static str] = &["url"];

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.title),
            opt_text(self.summary.as_deref()),
            opt_text(self.content.as_deref()),
            text(&self.url),
            opt_text(self.category.as_deref()),
            opt_text(self.publication_date.as_deref()),
            text(self.language.as_str()),
        ])
    }
}

impl Upsert for PositionPaper {
    const TABLE: &'static str = "standpunten";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "content",
        "url",
        "publication_year",
        "document_type",
        "language",
    ];
    const KEY: &'static [&'static str] = &["url"];

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.title),
            opt_text(self.description.as_deref()),
            opt_text(self.content.as_deref()),
            text(&self.url),
            opt_text(self.publication_year.as_deref()),
            opt_text(self.document_type.as_deref()),
            text(self.language.as_str()),
        ])
    }
}

impl Upsert for Dossier {
    const TABLE: &'static str = "dossiers";
    const COLUMNS: &'static [&'static str] =
        &["title", "description", "content", "url", "categories", "language"];
    const KEY: &'static [&'static str] = &["url"];

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.title),
            opt_text(self.description.as_deref()),
            opt_text(self.content.as_deref()),
            text(&self.url),
            json_list(&self.categories)?,
            text(self.language.as_str()),
        ])
    }
}

impl Upsert for Committee {
    const TABLE: &'static str = "committees";
    const COLUMNS: &'static [&'static str] =
        &["psc_number", "title", "description", "content", "url", "sector"];
    const KEY: &'static [&'static str] = &["psc_number"];

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.psc_number),
            text(&self.title),
            opt_text(self.description.as_deref()),
            opt_text(self.content.as_deref()),
            opt_text(self.url.as_deref()),
            opt_text(self.sector.as_deref()),
        ])
    }
}

impl Upsert for Event {
    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "event_type",
        "event_date",
        "event_time",
        "location_name",
        "location_address",
        "url",
        "language",
    ];
    const KEY: &'static [&'static str] = &["title", "event_date", "language"];

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.title),
            opt_text(self.description.as_deref()),
            opt_text(self.event_type.as_deref()),
            opt_text(self.event_date.as_deref()),
            opt_text(self.event_time.as_deref()),
            opt_text(self.location_name.as_deref()),
            opt_text(self.location_address.as_deref()),
            opt_text(self.url.as_deref()),
            text(self.language.as_str()),
        ])
    }
}

impl Upsert for Download {
    const TABLE: &'static str = "downloads";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "file_type",
        "download_url",
        "page_url",
        "categories",
        "languages_available",
    ];
    const KEY: &'static [&'static str] = &["download_url"];

    fn values(&self) -> Result<Vec<Value>> {
        let languages = match &self.languages_available {
            Some(languages) => json_list(languages)?,
            None => Value::Null,
        };
        Ok(vec![
            text(&self.title),
            opt_text(self.description.as_deref()),
            opt_text(self.file_type.as_deref()),
            text(&self.download_url),
            opt_text(self.page_url.as_deref()),
            json_list(&self.categories)?,
            languages,
        ])
    }
}

impl Upsert for AboutSection {
    const TABLE: &'static str = "about_info";
    const COLUMNS: &'static [&'static str] = &["section_title", "content", "section_type", "url"];
    const KEY: &'static [&'static str] = &["section_title", "url"];

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.section_title),
            text(&self.content),
            text(self.section_type.as_str()),
            opt_text(self.url.as_deref()),
        ])
    }
}

impl Upsert for PressArticle {
    const TABLE: &'static str = "press_articles";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "summary",
        "content",
        "url",
        "categories",
        "publication_date",
        "source",
        "language",
    ];
    const KEY: &'static [&'static str] = &["url"];

    fn values(&self) -> Result<Vec<Value>> {
        Ok(vec![
            text(&self.title),
            opt_text(self.summary.as_deref()),
            opt_text(self.content.as_deref()),
            text(&self.url),
            json_list(&self.categories)?,
            opt_text(self.publication_date.as_deref()),
            opt_text(self.source.as_deref()),
            text(self.language.as_str()),
        ])
    }
}

struct UpsertSql {
    select: String,
    update: String,
    insert: String,
    key_positions: Vec<usize>,
}

impl UpsertSql {
    fn for_kind<T: Upsert>() -> Result<Self> {
        let key_positions = T::KEY
            .iter()
            .map(|key| {
                T::COLUMNS
                    .iter()
                    .position(|column| column == key)
                    .with_context(|| format!("{} has no key column {}", T::TABLE, key))
            })
            .collect::<Result<Vec<_>>>()?;

        // `IS` so that a NULL key part still finds its row
        let key_match = T::KEY
            .iter()
            .enumerate()
            .map(|(i, key)| format!("{key} IS ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(" AND ");
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=T::COLUMNS.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            select: format!("SELECT id FROM {} WHERE {}", T::TABLE, key_match),
            update: format!(
                "UPDATE {} SET {}, scraped_at = datetime('now'), updated_at = datetime('now') WHERE id = ?{}",
                T::TABLE,
                assignments,
                T::COLUMNS.len() + 1
            ),
            insert: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                T::TABLE,
                T::COLUMNS.join(", "),
                placeholders
            ),
            key_positions,
        })
    }
}

/// Upserts a batch by natural key and records a successful scrape of
/// `section`. An empty batch touches nothing, not even the metadata row.
pub fn store_records<T: Upsert>(conn: &Connection, section: Section, items: &[T]) -> Result<usize> {
    if items.is_empty() {
        return Ok(0);
    }

    let sql = UpsertSql::for_kind::<T>()?;
    let tx = conn
        .unchecked_transaction()
        .context("failed to begin transaction")?;
    let mut inserted = 0;
    let mut updated = 0;

    for item in items {
        let values = item.values()?;
        if values.len() != T::COLUMNS.len() {
            anyhow::bail!(
                "{} row has {} values for {} columns",
                T::TABLE,
                values.len(),
                T::COLUMNS.len()
            );
        }
        let key = sql.key_positions.iter().map(|&i| &values[i]);

        let existing: Option<i64> = tx
            .query_row(&sql.select, params_from_iter(key), |row| row.get(0))
            .optional()
            .with_context(|| format!("failed to look up {} row", T::TABLE))?;

        match existing {
            Some(id) => {
                let id = Value::Integer(id);
                tx.execute(&sql.update, params_from_iter(values.iter().chain([&id])))
                    .with_context(|| format!("failed to update {} row", T::TABLE))?;
                updated += 1;
            }
            None => {
                tx.execute(&sql.insert, params_from_iter(values.iter()))
                    .with_context(|| format!("failed to insert {} row", T::TABLE))?;
                inserted += 1;
            }
        }
    }

    tx.commit().context("failed to commit batch")?;
    tracing::info!(section = %section, inserted, updated, "upserted records");

    update_scrape_metadata(conn, section, ScrapeStatus::Success, items.len(), None)?;
    Ok(inserted + updated)
}

pub fn store_news(conn: &Connection, items: &[NewsItem]) -> Result<usize> {
    store_records(conn, Section::News, items)
}

pub fn store_standpunten(conn: &Connection, items: &[PositionPaper]) -> Result<usize> {
    store_records(conn, Section::Standpunten, items)
}

pub fn store_dossiers(conn: &Connection, items: &[Dossier]) -> Result<usize> {
    store_records(conn, Section::Dossiers, items)
}

pub fn store_committees(conn: &Connection, items: &[Committee]) -> Result<usize> {
    store_records(conn, Section::Committees, items)
}

pub fn store_events(conn: &Connection, items: &[Event]) -> Result<usize> {
    store_records(conn, Section::Events, items)
}

pub fn store_downloads(conn: &Connection, items: &[Download]) -> Result<usize> {
    store_records(conn, Section::Downloads, items)
}

pub fn store_about_info(conn: &Connection, items: &[AboutSection]) -> Result<usize> {
    store_records(conn, Section::AboutInfo, items)
}

pub fn store_press_articles(conn: &Connection, items: &[PressArticle]) -> Result<usize> {
    store_records(conn, Section::PressArticles, items)
}

/// Replaces the scrape outcome row of `section`.
pub fn update_scrape_metadata(
    conn: &Connection,
    section: Section,
    status: ScrapeStatus,
    items_scraped: usize,
    error_message: Option<&str>,
) -> Result<()> {
    conn.execute(
        r#"INSERT OR REPLACE INTO scrape_metadata (section, last_scraped, status, items_scraped, error_message)
        VALUES (?1, datetime('now'), ?2, ?3, ?4)"#,
        params![
            section.as_str(),
            status.as_str(),
            items_scraped as i64,
            error_message
        ],
    )
    .with_context(|| format!("failed to record scrape outcome for {section}"))?;
    Ok(())
}
