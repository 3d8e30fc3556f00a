use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{Dossier, Language, Stored};

use crate::query::{language, stored, string_list, Select};

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<Dossier>> {
    let record = Dossier {
        title: row.get("title")?,
        description: row.get("description")?,
        content: row.get("content")?,
        url: row.get("url")?,
        categories: string_list(row, "categories")?,
        language: language(row, "language")?,
    };
    stored(row, record)
}

/// `category` matches as a substring of the stored category list.
pub fn search_dossiers(
    conn: &Connection,
    query: &str,
    category: Option<&str>,
    language: Option<Language>,
    limit: u32,
) -> Result<Vec<Stored<Dossier>>> {
    Select::from("dossiers")
        .matching(&["title", "description", "content"], query)
        .contains("categories", category)
        .equals("language", language.map(|l| l.as_str()))
        .order_by("updated_at DESC, id DESC")
        .limit(limit)
        .fetch(conn, decode)
}

pub fn get_all_dossiers(conn: &Connection, limit: u32) -> Result<Vec<Stored<Dossier>>> {
    Select::from("dossiers")
        .order_by("id ASC")
        .limit(limit)
        .fetch(conn, decode)
}
