use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{Language, PressArticle, Stored};

use crate::news::NEWEST_FIRST;
use crate::query::{language, stored, string_list, Select};

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<PressArticle>> {
    let record = PressArticle {
        title: row.get("title")?,
        summary: row.get("summary")?,
        content: row.get("content")?,
        url: row.get("url")?,
        categories: string_list(row, "categories")?,
        publication_date: row.get("publication_date")?,
        source: row.get("source")?,
        language: language(row, "language")?,
    };
    stored(row, record)
}

pub fn search_press_articles(
    conn: &Connection,
    query: &str,
    source: Option<&str>,
    language: Option<Language>,
    limit: u32,
) -> Result<Vec<Stored<PressArticle>>> {
    Select::from("press_articles")
        .matching(&["title", "summary", "content"], query)
        .contains("source", source)
        .equals("language", language.map(|l| l.as_str()))
        .order_by(NEWEST_FIRST)
        .limit(limit)
        .fetch(conn, decode)
}

pub fn get_recent_press_articles(conn: &Connection, limit: u32) -> Result<Vec<Stored<PressArticle>>> {
    Select::from("press_articles")
        .order_by(NEWEST_FIRST)
        .limit(limit)
        .fetch(conn, decode)
}
