use denuo_core::Dossier;

use crate::dedupe::dedupe;
use crate::extract::{anchors, bracket_tokens};
use crate::lexicon::is_navigation_text;
use crate::targets::PageContext;
use crate::text::{char_len, normalize};

const MIN_TITLE_CHARS: usize = 6;

pub fn parse_dossiers(html: &str, page: &PageContext<'_>) -> Vec<Dossier> {
    let mut dossiers = Vec::new();

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

        dossiers.push(Dossier {
            title,
            description: None,
            content: None,
            url: page.resolve(anchor.href),
            categories: bracket_tokens(anchor.markup),
            language: page.language,
        });
    }

    dedupe(dossiers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use denuo_core::Language;

    #[test]
    fn parses_dossier_links() {
        let page = PageContext {
            origin: "https://denuo.be",
            url: "https://denuo.be/nl/dossiers",
            language: Language::Nl,
        };
        let html = r#"
<nav><a href="/nl">Home</a><a href="/nl/contact">Contact</a></nav>
<div class="dossiers">
  <a href="/nl/dossiers/werkbaar-werk"><span>Werkbaar werk [Sociaal] [HR]</span></a>
  <a href="mailto:info@denuo.be">Mail het dossierteam</a>
  <a href="/nl/dossiers/kort">Kort</a>
  <a href="/nl/dossiers/werkbaar-werk">Werkbaar werk (opnieuw)</a>
  <a href="https://www.vlaanderen.be/afval">Afvalbeleid Vlaanderen</a>
</div>"#;
        let dossiers = parse_dossiers(html, &page);
        assert_eq!(dossiers.len(), 2);
        assert_eq!(dossiers[0].title, "Werkbaar werk [Sociaal] [HR]");
        assert_eq!(dossiers[0].url, "https://denuo.be/nl/dossiers/werkbaar-werk");
        assert_eq!(dossiers[0].categories, vec!["Sociaal", "HR"]);
        assert_eq!(dossiers[1].url, "https://www.vlaanderen.be/afval");
        assert!(dossiers[1].categories.is_empty());
        assert_eq!(dossiers[1].language, Language::Nl);
    }
}
