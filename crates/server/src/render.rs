//! Plain-text rendering of catalog results for tool responses.

use denuo_core::{
    AboutSection, AboutSectionType, Committee, Download, Dossier, Event, Language, NewsItem,
    PositionPaper, PressArticle, ScrapeMetadata, Stored,
};

const SEPARATOR: &str = "\n---\n\n";

fn listing<T>(heading: &str, items: &[T], block: impl Fn(&T) -> String) -> String {
    let body = items.iter().map(block).collect::<Vec<_>>().join(SEPARATOR);
    format!("{heading}:\n\n{body}")
}

fn found<T>(kind: &str, items: &[T], block: impl Fn(&T) -> String) -> String {
    listing(&format!("Found {} {kind}", items.len()), items, block)
}

fn or<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().unwrap_or(placeholder)
}

fn upper(language: Language) -> String {
    language.as_str().to_uppercase()
}

fn joined(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}

fn news_block(item: &Stored<NewsItem>) -> String {
    format!(
        "**{}** ({})\n{}\nCategory: {}\nDate: {}\nURL: {}\n",
        item.title,
        upper(item.language),
        or(&item.summary, "No summary available"),
        or(&item.category, "Uncategorized"),
        or(&item.publication_date, "Unknown"),
        item.url,
    )
}

pub fn news_search(query: &str, items: &[Stored<NewsItem>]) -> String {
    if items.is_empty() {
        return format!("No news found for query: \"{query}\"");
    }
    found("news articles", items, news_block)
}

pub fn recent_news(items: &[Stored<NewsItem>]) -> String {
    if items.is_empty() {
        return "No recent news found".to_string();
    }
    listing("Recent news", items, news_block)
}

pub fn article_details(id: i64, item: Option<&Stored<NewsItem>>) -> String {
    let Some(item) = item else {
        return format!("Article with ID {id} not found");
    };
    let body = item
        .content
        .as_deref()
        .or(item.summary.as_deref())
        .unwrap_or("No content available");
    format!(
        "**{}** ({})\n\n{}\n\n---\nCategory: {}\nPublished: {}\nURL: {}\nLast scraped: {}",
        item.title,
        upper(item.language),
        body,
        or(&item.category, "Uncategorized"),
        or(&item.publication_date, "Unknown"),
        item.url,
        item.scraped_at,
    )
}

pub fn standpunten_search(query: &str, items: &[Stored<PositionPaper>]) -> String {
    if items.is_empty() {
        return format!("No standpunten found for query: \"{query}\"");
    }
    found("standpunten", items, |item| {
        format!(
            "**{}**\n{}\nYear: {}\nType: {}\nLanguage: {}\nURL: {}\n",
            item.title,
            or(&item.description, "No description available"),
            or(&item.publication_year, "Unknown"),
            or(&item.document_type, "Document"),
            upper(item.language),
            item.url,
        )
    })
}

pub fn all_standpunten(items: &[Stored<PositionPaper>]) -> String {
    if items.is_empty() {
        return "No standpunten found".to_string();
    }
    listing("All standpunten", items, |item| {
        format!(
            "**{}**\nYear: {}\nType: {}\nURL: {}\n",
            item.title,
            or(&item.publication_year, "Unknown"),
            or(&item.document_type, "Document"),
            item.url,
        )
    })
}

pub fn dossiers_search(query: &str, items: &[Stored<Dossier>]) -> String {
    if items.is_empty() {
        return format!("No dossiers found for query: \"{query}\"");
    }
    found("dossiers", items, |item| {
        format!(
            "**{}**\n{}\nCategories: {}\nLanguage: {}\nURL: {}\n",
            item.title,
            or(&item.description, "No description available"),
            joined(&item.categories),
            upper(item.language),
            item.url,
        )
    })
}

pub fn all_dossiers(items: &[Stored<Dossier>]) -> String {
    if items.is_empty() {
        return "No dossiers found".to_string();
    }
    listing("All dossiers", items, |item| {
        format!(
            "**{}**\nCategories: {}\nLanguage: {}\nURL: {}\n",
            item.title,
            joined(&item.categories),
            upper(item.language),
            item.url,
        )
    })
}

fn committee_block(item: &Stored<Committee>) -> String {
    format!(
        "**{}: {}**\n{}\nSector: {}\nURL: {}\n",
        item.psc_number,
        item.title,
        or(&item.description, "No description available"),
        or(&item.sector, "Not specified"),
        or(&item.url, "None"),
    )
}

pub fn committees_search(query: &str, items: &[Stored<Committee>]) -> String {
    if items.is_empty() {
        return format!("No committees found for query: \"{query}\"");
    }
    found("committees", items, committee_block)
}

pub fn committees(items: &[Stored<Committee>]) -> String {
    if items.is_empty() {
        return "No committees found".to_string();
    }
    listing("Paritaire Comités", items, committee_block)
}

pub fn events(upcoming_only: bool, items: &[Stored<Event>]) -> String {
    if items.is_empty() {
        return if upcoming_only {
            "No upcoming events found".to_string()
        } else {
            "No events found".to_string()
        };
    }
    let heading = if upcoming_only { "Upcoming events" } else { "All events" };
    listing(heading, items, |event| {
        let mut block = format!(
            "**{}**\n{}\nType: {}\nDate: {}\nTime: {}\nLocation: {}\n",
            event.title,
            or(&event.description, "No description available"),
            or(&event.event_type, "Event"),
            or(&event.event_date, "TBD"),
            or(&event.event_time, "TBD"),
            or(&event.location_name, "TBD"),
        );
        if let Some(address) = &event.location_address {
            block.push_str(&format!("Address: {address}\n"));
        }
        if let Some(url) = &event.url {
            block.push_str(&format!("URL: {url}\n"));
        }
        block
    })
}

fn languages(item: &Download) -> String {
    match &item.languages_available {
        Some(languages) if !languages.is_empty() => languages.join(", "),
        _ => "Not specified".to_string(),
    }
}

pub fn downloads_search(query: &str, items: &[Stored<Download>]) -> String {
    if items.is_empty() {
        return format!("No downloads found for query: \"{query}\"");
    }
    found("downloads", items, |item| {
        format!(
            "**{}**\n{}\nFile Type: {}\nCategories: {}\nLanguages: {}\nDownload: {}\n",
            item.title,
            or(&item.description, "No description available"),
            or(&item.file_type, "Unknown"),
            joined(&item.categories),
            languages(item),
            item.download_url,
        )
    })
}

pub fn all_downloads(items: &[Stored<Download>]) -> String {
    if items.is_empty() {
        return "No downloads found".to_string();
    }
    listing("All downloads", items, |item| {
        format!(
            "**{}**\nFile Type: {}\nCategories: {}\nDownload: {}\n",
            item.title,
            or(&item.file_type, "Unknown"),
            joined(&item.categories),
            item.download_url,
        )
    })
}

pub fn about_info(section_type: Option<AboutSectionType>, items: &[Stored<AboutSection>]) -> String {
    if items.is_empty() {
        return match section_type {
            Some(section_type) => {
                format!("No about info found for section: \"{}\"", section_type.as_str())
            }
            None => "No about info found".to_string(),
        };
    }
    listing("About Denuo", items, |item| {
        let mut block = format!(
            "**{}**\n{}\nSection Type: {}\n",
            item.section_title,
            item.content,
            item.section_type.as_str(),
        );
        if let Some(url) = &item.url {
            block.push_str(&format!("URL: {url}\n"));
        }
        block
    })
}

pub fn press_search(query: &str, items: &[Stored<PressArticle>]) -> String {
    if items.is_empty() {
        return format!("No press articles found for query: \"{query}\"");
    }
    found("press articles", items, |item| {
        format!(
            "**{}** ({})\n{}\nSource: {}\nCategories: {}\nDate: {}\nURL: {}\n",
            item.title,
            upper(item.language),
            or(&item.summary, "No summary available"),
            or(&item.source, "Unknown"),
            joined(&item.categories),
            or(&item.publication_date, "Unknown"),
            item.url,
        )
    })
}

pub fn recent_press(items: &[Stored<PressArticle>]) -> String {
    if items.is_empty() {
        return "No recent press articles found".to_string();
    }
    listing("Recent press articles", items, |item| {
        format!(
            "**{}** ({})\n{}\nSource: {}\nDate: {}\nURL: {}\n",
            item.title,
            upper(item.language),
            or(&item.summary, "No summary available"),
            or(&item.source, "Unknown"),
            or(&item.publication_date, "Unknown"),
            item.url,
        )
    })
}

pub fn scrape_status(rows: &[ScrapeMetadata]) -> String {
    if rows.is_empty() {
        return "No scrape runs recorded".to_string();
    }
    listing("Scrape status", rows, |row| {
        let mut block = format!(
            "**{}**\nStatus: {}\nItems: {}\nLast scraped: {}\n",
            row.section,
            row.status.as_str(),
            row.items_scraped,
            row.last_scraped,
        );
        if let Some(error) = &row.error_message {
            block.push_str(&format!("Error: {error}\n"));
        }
        block
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored<T>(id: i64, record: T) -> Stored<T> {
        Stored {
            id,
            record,
            scraped_at: "2025-03-01 08:00:00".to_string(),
            updated_at: "2025-03-01 08:00:00".to_string(),
        }
    }

    fn news(title: &str, summary: Option<&str>) -> Stored<NewsItem> {
        stored(
            1,
            NewsItem {
                title: title.to_string(),
                summary: summary.map(str::to_string),
                content: None,
                url: "https://denuo.be/nl/nieuws/a".to_string(),
                category: None,
                publication_date: Some("2025-02-14".to_string()),
                language: Language::Fr,
            },
        )
    }

    #[test]
    fn news_blocks_use_placeholders_and_separator() {
        let items = vec![
            news("Accord salarial conclu", Some("Les partenaires ont signé.")),
            news("Nouvelle réglementation déchets", None),
        ];
        let text = news_search("accord", &items);
        assert_eq!(
            text,
            "Found 2 news articles:\n\n\
             **Accord salarial conclu** (FR)\nLes partenaires ont signé.\nCategory: Uncategorized\nDate: 2025-02-14\nURL: https://denuo.be/nl/nieuws/a\n\
             \n---\n\n\
             **Nouvelle réglementation déchets** (FR)\nNo summary available\nCategory: Uncategorized\nDate: 2025-02-14\nURL: https://denuo.be/nl/nieuws/a\n"
        );
    }

    #[test]
    fn empty_results_render_messages() {
        assert_eq!(news_search("loon", &[]), "No news found for query: \"loon\"");
        assert_eq!(recent_news(&[]), "No recent news found");
        assert_eq!(events(true, &[]), "No upcoming events found");
        assert_eq!(events(false, &[]), "No events found");
        assert_eq!(
            about_info(Some(AboutSectionType::Team), &[]),
            "No about info found for section: \"team\""
        );
        assert_eq!(article_details(42, None), "Article with ID 42 not found");
    }

    #[test]
    fn event_optional_lines() {
        let event = stored(
            3,
            Event {
                title: "Workshop brandveiligheid".to_string(),
                description: None,
                event_type: Some("Workshop".to_string()),
                event_date: Some("12 maart 2025".to_string()),
                event_time: None,
                location_name: None,
                location_address: None,
                url: Some("https://denuo.be/nl/agenda/workshop".to_string()),
                language: Language::Nl,
            },
        );
        let text = events(true, &[event]);
        assert_eq!(
            text,
            "Upcoming events:\n\n**Workshop brandveiligheid**\nNo description available\nType: Workshop\n\
             Date: 12 maart 2025\nTime: TBD\nLocation: TBD\nURL: https://denuo.be/nl/agenda/workshop\n"
        );
    }

    #[test]
    fn committee_heading_combines_number_and_title() {
        let committee = stored(
            7,
            Committee {
                psc_number: "PSC 142.01".to_string(),
                title: "Terugwinning van metalen".to_string(),
                description: None,
                content: None,
                url: None,
                sector: Some("metalen".to_string()),
            },
        );
        let text = committees(&[committee]);
        assert!(text.starts_with("Paritaire Comités:\n\n**PSC 142.01: Terugwinning van metalen**\n"));
        assert!(text.contains("Sector: metalen\nURL: None\n"));
    }
}
