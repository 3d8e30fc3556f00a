use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{Committee, Stored};

use crate::query::{stored, Select};

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<Committee>> {
    let record = Committee {
        psc_number: row.get("psc_number")?,
        title: row.get("title")?,
        description: row.get("description")?,
        content: row.get("content")?,
        url: row.get("url")?,
        sector: row.get("sector")?,
    };
    stored(row, record)
}

/// Matches the number as well as the name, so "142" finds every PSC 142.x.
pub fn search_committees(
    conn: &Connection,
    query: &str,
    sector: Option<&str>,
    limit: u32,
) -> Result<Vec<Stored<Committee>>> {
    Select::from("committees")
        .matching(&["psc_number", "title", "description"], query)
        .equals_ignore_case("sector", sector)
        .order_by("updated_at DESC, id DESC")
        .limit(limit)
        .fetch(conn, decode)
}

pub fn get_all_committees(conn: &Connection, limit: u32) -> Result<Vec<Stored<Committee>>> {
    Select::from("committees")
        .order_by("id ASC")
        .limit(limit)
        .fetch(conn, decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use ingest::store_committees;

    fn committee(number: &str, title: &str, sector: Option<&str>) -> Committee {
        Committee {
            psc_number: number.to_string(),
            title: title.to_string(),
            description: None,
            content: None,
            url: None,
            sector: sector.map(str::to_string),
        }
    }

    #[test]
    fn search_by_number_and_sector() {
        let conn = memory_db();
        store_committees(
            &conn,
            &[
                committee("PSC 142.01", "Terugwinning van metalen", Some("metalen")),
                committee("PSC 142.02", "Terugwinning van lompen", Some("lompen")),
                committee("PSC 200.00", "Aanvullend paritair comité", None),
            ],
        )
        .unwrap();

        assert_eq!(search_committees(&conn, "142", None, 10).unwrap().len(), 2);
        let metal = search_committees(&conn, "terugwinning", Some("Metalen"), 10).unwrap();
        assert_eq!(metal.len(), 1);
        assert_eq!(metal[0].psc_number, "PSC 142.01");

        let all = get_all_committees(&conn, 2).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].psc_number, "PSC 142.01");
        assert_eq!(all[0].url, None);
    }
}
