use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{PositionPaper, Stored};

use crate::query::{language, stored, Select};

const NEWEST_YEAR_FIRST: &str = "publication_year IS NULL, publication_year DESC, id ASC";

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<PositionPaper>> {
    let record = PositionPaper {
        title: row.get("title")?,
        description: row.get("description")?,
        content: row.get("content")?,
        url: row.get("url")?,
        publication_year: row.get("publication_year")?,
        document_type: row.get("document_type")?,
        language: language(row, "language")?,
    };
    stored(row, record)
}

pub fn search_standpunten(
    conn: &Connection,
    query: &str,
    year: Option<&str>,
    limit: u32,
) -> Result<Vec<Stored<PositionPaper>>> {
    Select::from("standpunten")
        .matching(&["title", "description", "content"], query)
        .equals("publication_year", year.map(str::trim))
        .order_by(NEWEST_YEAR_FIRST)
        .limit(limit)
        .fetch(conn, decode)
}

pub fn get_all_standpunten(conn: &Connection, limit: u32) -> Result<Vec<Stored<PositionPaper>>> {
    Select::from("standpunten")
        .order_by(NEWEST_YEAR_FIRST)
        .limit(limit)
        .fetch(conn, decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use denuo_core::Language;
    use ingest::store_standpunten;

    fn paper(title: &str, url: &str, year: Option<&str>) -> PositionPaper {
        PositionPaper {
            title: title.to_string(),
            description: Some("Memorandum".to_string()),
            content: None,
            url: url.to_string(),
            publication_year: year.map(str::to_string),
            document_type: Some("Memorandum".to_string()),
            language: Language::Nl,
        }
    }

    #[test]
    fn newest_year_first_then_insertion_order() {
        let conn = memory_db();
        store_standpunten(
            &conn,
            &[
                paper("Memorandum werkbaar werk", "https://denuo.be/a.pdf", Some("2021")),
                paper("Memorandum zonder jaar", "https://denuo.be/b.pdf", None),
                paper("Memorandum verkiezingen", "https://denuo.be/c.pdf", Some("2024")),
                paper("Memorandum energie", "https://denuo.be/d.pdf", Some("2024")),
            ],
        )
        .unwrap();

        let all = get_all_standpunten(&conn, 20).unwrap();
        let urls: Vec<_> = all.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://denuo.be/c.pdf",
                "https://denuo.be/d.pdf",
                "https://denuo.be/a.pdf",
                "https://denuo.be/b.pdf",
            ]
        );
    }

    #[test]
    fn search_by_year() {
        let conn = memory_db();
        store_standpunten(
            &conn,
            &[
                paper("Memorandum werkbaar werk", "https://denuo.be/a.pdf", Some("2021")),
                paper("Memorandum verkiezingen", "https://denuo.be/c.pdf", Some("2024")),
            ],
        )
        .unwrap();

        let found = search_standpunten(&conn, "memorandum", Some("2021"), 10).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].publication_year.as_deref(), Some("2021"));
        assert!(search_standpunten(&conn, "memorandum", Some("1999"), 10)
            .unwrap()
            .is_empty());
    }
}
