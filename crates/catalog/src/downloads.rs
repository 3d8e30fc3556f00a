use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{file_type_label, Download, Stored};

use crate::query::{opt_string_list, stored, string_list, Select};

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<Download>> {
    let record = Download {
        title: row.get("title")?,
        description: row.get("description")?,
        file_type: row.get("file_type")?,
        download_url: row.get("download_url")?,
        page_url: row.get("page_url")?,
        categories: string_list(row, "categories")?,
        languages_available: opt_string_list(row, "languages_available")?,
    };
    stored(row, record)
}

/// `file_type` is either a stored label ("Word") or an extension ("docx").
pub fn search_downloads(
    conn: &Connection,
    query: &str,
    file_type: Option<&str>,
    limit: u32,
) -> Result<Vec<Stored<Download>>> {
    let wanted: Vec<&str> = match file_type.map(str::trim).filter(|t| !t.is_empty()) {
        Some(raw) => vec![file_type_label(raw).unwrap_or(raw)],
        None => Vec::new(),
    };
    Select::from("downloads")
        .matching(&["title", "description"], query)
        .one_of_ignore_case("file_type", &wanted)
        .order_by("updated_at DESC, id DESC")
        .limit(limit)
        .fetch(conn, decode)
}

pub fn get_all_downloads(conn: &Connection, limit: u32) -> Result<Vec<Stored<Download>>> {
    Select::from("downloads")
        .order_by("id ASC")
        .limit(limit)
        .fetch(conn, decode)
}
