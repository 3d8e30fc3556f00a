use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{Language, NewsItem, Stored};

use crate::query::{language, stored, Select};

/// Dated rows newest first, undated rows last.
pub(crate) const NEWEST_FIRST: &str = "publication_date IS NULL, publication_date DESC, id DESC";

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<NewsItem>> {
    let record = NewsItem {
        title: row.get("title")?,
        summary: row.get("summary")?,
        content: row.get("content")?,
        url: row.get("url")?,
        category: row.get("category")?,
        publication_date: row.get("publication_date")?,
        language: language(row, "language")?,
    };
    stored(row, record)
}

pub fn search_news(
    conn: &Connection,
    query: &str,
    language: Option<Language>,
    category: Option<&str>,
    limit: u32,
) -> Result<Vec<Stored<NewsItem>>> {
    Select::from("news")
        .matching(&["title", "summary", "content"], query)
        .equals("language", language.as_ref().map(Language::as_str))
        .equals_ignore_case("category", category)
        .order_by(NEWEST_FIRST)
        .limit(limit)
        .fetch(conn, decode)
}

pub fn get_recent_news(
    conn: &Connection,
    language: Option<Language>,
    limit: u32,
) -> Result<Vec<Stored<NewsItem>>> {
    Select::from("news")
        .equals("language", language.as_ref().map(Language::as_str))
        .order_by(NEWEST_FIRST)
        .limit(limit)
        .fetch(conn, decode)
}

pub fn get_news_by_id(conn: &Connection, id: i64) -> Result<Option<Stored<NewsItem>>> {
    let mut rows = Select::from("news").id(id).limit(1).fetch(conn, decode)?;
    Ok(rows.pop())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use ingest::store_news;

    fn item(title: &str, url: &str, date: Option<&str>, language: Language) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            summary: None,
            content: None,
            url: url.to_string(),
            category: Some("Sociaal".to_string()),
            publication_date: date.map(str::to_string),
            language,
        }
    }

    #[test]
    fn round_trip_by_id() {
        let conn = memory_db();
        let original = NewsItem {
            title: "Sectorakkoord 2024 afgerond & ondertekend".to_string(),
            summary: Some("Restricted content - Login required".to_string()),
            content: Some("Volledige tekst met \"aanhalingstekens\" en 'quotes'".to_string()),
            url: "https://denuo.be/nl/nieuws/sectorakkoord?x=1&y=2".to_string(),
            category: Some("Sociaal".to_string()),
            publication_date: Some("2024-03-12".to_string()),
            language: Language::Nl,
        };
        store_news(&conn, &[original.clone()]).unwrap();

        let id: i64 = conn
            .query_row("SELECT id FROM news", [], |r| r.get(0))
            .unwrap();
        let found = get_news_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.record, original);
        assert!(!found.scraped_at.is_empty());

        assert!(get_news_by_id(&conn, id + 100).unwrap().is_none());
    }

    #[test]
    fn search_filters_and_orders() {
        let conn = memory_db();
        store_news(
            &conn,
            &[
                item("Loonakkoord bereikt", "https://denuo.be/a", Some("2024-01-10"), Language::Nl),
                item("Nieuw loonakkoord getekend", "https://denuo.be/b", Some("2024-05-01"), Language::Nl),
                item("Accord salarial conclu", "https://denuo.be/c", Some("2024-06-01"), Language::Fr),
                item("Loonakkoord zonder datum", "https://denuo.be/d", None, Language::Nl),
            ],
        )
        .unwrap();

        let found = search_news(&conn, "LOONAKKOORD", Some(Language::Nl), None, 10).unwrap();
        let urls: Vec<_> = found.iter().map(|n| n.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://denuo.be/b", "https://denuo.be/a", "https://denuo.be/d"]
        );

        let limited = search_news(&conn, "akkoord", None, None, 1).unwrap();
        assert_eq!(limited.len(), 1);

        let none = search_news(&conn, "loon", None, Some("Energie"), 10).unwrap();
        assert!(none.is_empty());
        let sociaal = search_news(&conn, "loon", None, Some("sociaal"), 10).unwrap();
        assert_eq!(sociaal.len(), 3);
    }

    #[test]
    fn wildcards_in_query_are_literal() {
        let conn = memory_db();
        store_news(
            &conn,
            &[item("Groei van 100% in recyclage", "https://denuo.be/p", None, Language::Nl)],
        )
        .unwrap();
        assert_eq!(search_news(&conn, "100%", None, None, 10).unwrap().len(), 1);
        assert!(search_news(&conn, "_00%", None, None, 10).unwrap().is_empty());
    }

    #[test]
    fn recent_news_by_language() {
        let conn = memory_db();
        store_news(
            &conn,
            &[
                item("Sectorakkoord 2024 afgerond", "https://denuo.be/a", Some("2024-01-10"), Language::Nl),
                item("Accord sectoriel conclu", "https://denuo.be/b", Some("2024-02-10"), Language::Fr),
            ],
        )
        .unwrap();
        let french = get_recent_news(&conn, Some(Language::Fr), 10).unwrap();
        assert_eq!(french.len(), 1);
        assert_eq!(french[0].language, Language::Fr);

        let all = get_recent_news(&conn, None, 10).unwrap();
        assert_eq!(all[0].url, "https://denuo.be/b");
    }
}
