use once_cell::sync::Lazy;
use regex::Regex;

use denuo_core::AboutSection;

use crate::extract::all_matches;
use crate::lexicon::about_section_type_for;
use crate::targets::PageContext;
use crate::text::{char_len, normalize, normalize_opt};

static MAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<main\b[^>]*>(.*)</main>").expect("main regex"));
static HEADING_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h[1-6]\b").expect("heading start regex"));
static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^<h[1-6][^>]*>(.*?)</h[1-6]\s*>").expect("heading regex"));
static TEXT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">([^<]+)<").expect("text run regex"));

const MIN_CONTENT_CHARS: usize = 21;

/// Parses the about page: the main content split at its headings, one
/// section per heading with all text of the chunk, heading included.
pub fn parse_about(html: &str, page: &PageContext<'_>) -> Vec<AboutSection> {
    let Some(main) = MAIN_RE.captures(html).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };
    let main = main.as_str();

    let starts: Vec<usize> = HEADING_START_RE.find_iter(main).map(|m| m.start()).collect();
    let mut sections = Vec::new();

    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(main.len());
        let chunk = &main[start..end];

        let Some(heading) = HEADING_RE.captures(chunk) else {
            continue;
        };
        let Some(section_title) = heading.get(1).and_then(|inner| normalize_opt(inner.as_str()))
        else {
            continue;
        };

        // the heading's own text counts towards the content
        let content = normalize(&all_matches(chunk, &TEXT_RUN_RE).join(" "));
        if char_len(&content) < MIN_CONTENT_CHARS {
            continue;
        }

        sections.push(AboutSection {
            section_type: about_section_type_for(&section_title),
            section_title,
            content,
            url: Some(page.url.to_string()),
        });
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use denuo_core::{AboutSectionType, Language};

    fn page() -> PageContext<'static> {
        PageContext {
            origin: "https://denuo.be",
            url: "https://denuo.be/nl/over-denuo",
            language: Language::Nl,
        }
    }

    #[test]
    fn splits_main_content_at_headings() {
        let html = r#"
<header><h1>Denuo</h1><nav>Menu</nav></header>
<main class="content">
  <h1>Over Denuo</h1>
  <h2>Onze visie</h2>
  <p>Denuo vertegenwoordigt de recyclage- en afvalsector in België.</p>
  <p>Wij zetten in op een circulaire economie.</p>
  <h2>Raad van <em>bestuur</em></h2>
  <ul><li>Voorzitter: Jan Janssens, directeur van een recyclagebedrijf</li></ul>
  <h3>Kort</h3>
  <p>Te weinig.</p>
</main>
<footer><h2>Contact</h2><p>Brusselsesteenweg 1, 1000 Brussel, België</p></footer>"#;
        let sections = parse_about(html, &page());
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].section_title, "Onze visie");
        assert_eq!(sections[0].section_type, AboutSectionType::Mission);
        assert_eq!(
            sections[0].content,
            "Onze visie Denuo vertegenwoordigt de recyclage- en afvalsector in België. Wij zetten in op een circulaire economie."
        );
        assert_eq!(sections[0].url.as_deref(), Some("https://denuo.be/nl/over-denuo"));

        assert_eq!(sections[1].section_title, "Raad van bestuur");
        assert_eq!(sections[1].section_type, AboutSectionType::Governance);
        assert_eq!(
            sections[1].content,
            "Raad van bestuur Voorzitter: Jan Janssens, directeur van een recyclagebedrijf"
        );
    }

    #[test]
    fn heading_text_counts_towards_minimum_length() {
        let html = "<main><h2>Contact</h2><p>Tel 02 123 45 67</p><h2>Kort</h2><p>Te weinig.</p></main>";
        let sections = parse_about(html, &page());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_title, "Contact");
        assert_eq!(sections[0].content, "Contact Tel 02 123 45 67");
        assert_eq!(sections[0].section_type, AboutSectionType::Contact);
    }

    #[test]
    fn no_main_element_means_nothing() {
        let html = "<body><h2>Contact</h2><p>Brusselsesteenweg 1, 1000 Brussel</p></body>";
        assert!(parse_about(html, &page()).is_empty());
    }
}
