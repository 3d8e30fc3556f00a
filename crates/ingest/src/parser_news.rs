use once_cell::sync::Lazy;
use regex::Regex;

use denuo_core::{NewsItem, RESTRICTED_SUMMARY};

use crate::dedupe::dedupe;
use crate::extract::first_match;
use crate::lexicon::is_navigation_text;
use crate::targets::PageContext;
use crate::text::{char_len, normalize, normalize_opt};

static ARTICLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<article\b[^>]*\babout="([^"]*)"[^>]*>.*?</article>"#).expect("article regex")
});
static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<span[^>]*class="[^"]*field--name-title[^"]*"[^>]*>([^<]+)</span>"#)
        .expect("title regex")
});
static ARTICLE_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<div[^>]*class="[^"]*field--name-field-article-type[^"]*".*?<div[^>]*class="field__item"[^>]*>([^<]+)</div>"#,
    )
    .expect("article type regex")
});
static THEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<div[^>]*class="[^"]*field--name-field-theme[^"]*".*?<div[^>]*class="field__item"[^>]*>([^<]+)</div>"#,
    )
    .expect("theme regex")
});
static DATETIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<time[^>]*\bdatetime="(\d{4}-\d{2}-\d{2})"#).expect("datetime regex")
});

const MIN_HREF_CHARS: usize = 5;
const MIN_TITLE_CHARS: usize = 11;

/// Parses the news listing: one `<article about="…">` per item.
pub fn parse_news(html: &str, page: &PageContext<'_>) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for caps in ARTICLE_RE.captures_iter(html) {
        let (Some(block), Some(href)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let block = block.as_str();
        let href = href.as_str();
        if char_len(href) < MIN_HREF_CHARS {
            continue;
        }

        let Some(title) = first_match(block, &TITLE_RE).map(normalize) else {
            continue;
        };
        if char_len(&title) < MIN_TITLE_CHARS || is_navigation_text(&title) {
            continue;
        }

        let category = first_match(block, &ARTICLE_TYPE_RE)
            .or_else(|| first_match(block, &THEME_RE))
            .and_then(normalize_opt);

        let restricted = block.contains("is-restricted") || block.contains("image-lock");

        items.push(NewsItem {
            title,
            summary: restricted.then(|| RESTRICTED_SUMMARY.to_string()),
            content: None,
            url: page.resolve(href),
            category,
            publication_date: first_match(block, &DATETIME_RE).map(str::to_string),
            language: page.language,
        });
    }

    dedupe(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use denuo_core::Language;

    fn page(language: Language) -> PageContext<'static> {
        PageContext {
            origin: "https://denuo.be",
            url: "https://denuo.be/nl/denuo-nieuws",
            language,
        }
    }

    const LISTING: &str = r#"
<div class="view-content">
  <article about="/nl/nieuws/sectorakkoord-2024" class="node node--type-article is-restricted">
    <h2><a href="/nl/nieuws/sectorakkoord-2024"><span class="field field--name-title">Sectorakkoord 2024 afgerond</span></a></h2>
    <time datetime="2024-03-12T09:00:00Z">12 maart 2024</time>
    <div class="field field--name-field-article-type">
      <div class="field__label">Type</div>
      <div class="field__item">Sociaal</div>
    </div>
  </article>
  <article about="/nl/nieuws/energie" class="node">
    <span class="field field--name-title">Energieprijzen en de recyclagesector</span>
    <div class="field field--name-field-theme"><div class="field__item">Energie</div></div>
  </article>
  <article about="/nl/nieuws/kort" class="node">
    <span class="field field--name-title">Kort</span>
  </article>
  <article about="/x" class="node">
    <span class="field field--name-title">Een titel die lang genoeg is</span>
  </article>
  <article about="/nl/nieuws/sectorakkoord-2024" class="node">
    <span class="field field--name-title">Sectorakkoord 2024 afgerond (dubbel)</span>
  </article>
</div>"#;

    #[test]
    fn parses_articles() {
        let items = parse_news(LISTING, &page(Language::Nl));
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.title, "Sectorakkoord 2024 afgerond");
        assert_eq!(first.url, "https://denuo.be/nl/nieuws/sectorakkoord-2024");
        assert_eq!(first.category.as_deref(), Some("Sociaal"));
        assert_eq!(first.summary.as_deref(), Some(RESTRICTED_SUMMARY));
        assert_eq!(first.publication_date.as_deref(), Some("2024-03-12"));
        assert_eq!(first.language, Language::Nl);

        let second = &items[1];
        assert_eq!(second.category.as_deref(), Some("Energie"));
        assert_eq!(second.summary, None);
        assert_eq!(second.publication_date, None);
    }

    #[test]
    fn language_comes_from_the_page() {
        let html = r#"<article about="/fr/actualites/accord"><span class="field--name-title">Accord sectoriel conclu</span></article>"#;
        let items = parse_news(html, &page(Language::Fr));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].language, Language::Fr);
    }

    #[test]
    fn lock_icon_marks_restricted() {
        let html = r#"<article about="/nl/nieuws/leden"><i class="image-lock"></i><span class="field--name-title">Enkel voor leden: loonschalen</span></article>"#;
        let items = parse_news(html, &page(Language::Nl));
        assert_eq!(items[0].summary.as_deref(), Some(RESTRICTED_SUMMARY));
    }

    #[test]
    fn navigation_titles_are_dropped() {
        let html = r#"<article about="/nl/contact"><span class="field--name-title">Contacteer ons vandaag nog</span></article>"#;
        assert!(parse_news(html, &page(Language::Nl)).is_empty());
    }

    #[test]
    fn empty_page() {
        assert!(parse_news("<html><body></body></html>", &page(Language::Nl)).is_empty());
    }
}
