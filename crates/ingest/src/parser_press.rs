use denuo_core::PressArticle;

use crate::dedupe::dedupe;
use crate::extract::{anchors, bracket_tokens};
use crate::lexicon::{is_navigation_text, press_source_for};
use crate::targets::PageContext;
use crate::text::{char_len, normalize};

const MIN_TITLE_CHARS: usize = 11;

/// Parses the "Denuo in de pers" page. Every qualifying link is one article;
/// the outlet is recognised from the title when it names one.
pub fn parse_press_articles(html: &str, page: &PageContext<'_>) -> Vec<PressArticle> {
    let mut articles = Vec::new();

    for anchor in anchors(html) {
        if anchor.is_skippable() {
            continue;
        }
        let Some(title) = anchor.text().map(normalize) else {
            continue;
        };
        if char_len(&title) < MIN_TITLE_CHARS || is_navigation_text(&title) {
            continue;
        }

        articles.push(PressArticle {
            source: press_source_for(&title).map(str::to_string),
            title,
            summary: None,
            content: None,
            url: page.resolve(anchor.href),
            categories: bracket_tokens(anchor.markup),
            publication_date: None,
            language: page.language,
        });
    }

    dedupe(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use denuo_core::Language;

    #[test]
    fn parses_press_links() {
        let page = PageContext {
            origin: "https://denuo.be",
            url: "https://denuo.be/nl/denuo-de-pers-0",
            language: Language::Nl,
        };
        let html = r#"
<div class="press">
  <a href="https://www.standaard.be/cnt/dmf2024">De Standaard: recyclagebedrijven vragen stabiel kader [Opinie]</a>
  <a href="/nl/pers/vrt">Interview VRT over kritieke grondstoffen</a>
  <a href="/nl/pers/kort">Kort stuk</a>
  <a href="/nl/pers/knack">Bijdrage in Knack over afvalbeleid</a>
</div>"#;
        let articles = parse_press_articles(html, &page);
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].source.as_deref(), Some("De Standaard"));
        assert_eq!(articles[0].categories, vec!["Opinie"]);
        assert_eq!(articles[0].url, "https://www.standaard.be/cnt/dmf2024");
        assert_eq!(articles[1].source.as_deref(), Some("VRT"));
        assert_eq!(articles[1].url, "https://denuo.be/nl/pers/vrt");
        assert_eq!(articles[2].source, None);
    }
}
