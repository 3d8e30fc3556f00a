use anyhow::Result;
use rusqlite::{Connection, Row};

use denuo_core::{AboutSection, AboutSectionType, Stored};

use crate::query::{conversion_failure, stored, Select};

fn decode(row: &Row<'_>) -> rusqlite::Result<Stored<AboutSection>> {
    let raw: String = row.get("section_type")?;
    let section_type = AboutSectionType::from_name(&raw)
        .ok_or_else(|| conversion_failure(row, "section_type", format!("unknown section type {raw:?}")))?;
    let record = AboutSection {
        section_title: row.get("section_title")?,
        content: row.get("content")?,
        section_type,
        url: row.get("url")?,
    };
    stored(row, record)
}

pub fn get_about_info(
    conn: &Connection,
    section_type: Option<AboutSectionType>,
) -> Result<Vec<Stored<AboutSection>>> {
    Select::from("about_info")
        .equals("section_type", section_type.map(|t| t.as_str()))
        .order_by("id ASC")
        .fetch(conn, decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;
    use ingest::store_about_info;

    fn section(title: &str, section_type: AboutSectionType) -> AboutSection {
        AboutSection {
            section_title: title.to_string(),
            content: "Denuo vertegenwoordigt de recyclagesector in België.".to_string(),
            section_type,
            url: Some("https://denuo.be/nl/over-denuo".to_string()),
        }
    }

    #[test]
    fn filters_by_section_type() {
        let conn = memory_db();
        store_about_info(
            &conn,
            &[
                section("Onze missie", AboutSectionType::Mission),
                section("Het team", AboutSectionType::Team),
                section("Contacteer ons", AboutSectionType::Contact),
            ],
        )
        .unwrap();

        assert_eq!(get_about_info(&conn, None).unwrap().len(), 3);
        let team = get_about_info(&conn, Some(AboutSectionType::Team)).unwrap();
        assert_eq!(team.len(), 1);
        assert_eq!(team[0].section_title, "Het team");
        assert!(get_about_info(&conn, Some(AboutSectionType::Governance))
            .unwrap()
            .is_empty());
    }
}
