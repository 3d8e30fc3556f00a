use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{ScrapeMetadata, ScrapeStatus, Section};

use crate::query::{conversion_failure, Select};

fn decode(row: &Row<'_>) -> rusqlite::Result<ScrapeMetadata> {
    let section: String = row.get("section")?;
    let status: String = row.get("status")?;
    Ok(ScrapeMetadata {
        section: Section::from_name(&section)
            .ok_or_else(|| conversion_failure(row, "section", format!("unknown section {section:?}")))?,
        last_scraped: row.get("last_scraped")?,
        status: ScrapeStatus::from_name(&status)
            .ok_or_else(|| conversion_failure(row, "status", format!("unknown status {status:?}")))?,
        items_scraped: row.get("items_scraped")?,
        error_message: row.get("error_message")?,
    })
}

/// Most recent scrape outcome per section, in section order.
pub fn list_scrape_metadata(conn: &Connection) -> Result<Vec<ScrapeMetadata>> {
    let mut rows = Select::from("scrape_metadata").fetch(conn, decode)?;
    rows.sort_by_key(|row| Section::ALL.iter().position(|s| *s == row.section));
    Ok(rows)
}
