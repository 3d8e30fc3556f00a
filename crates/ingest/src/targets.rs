use denuo_core::{Language, Section};

/// One page fetched per scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeTarget {
    pub section: Section,
    pub language: Language,
    pub path: &'static str,
}

impl ScrapeTarget {
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// The pages a run covers. News is the only section with two pages; both
/// merge into the one news batch.
pub const TARGETS: &[ScrapeTarget] = &[
    ScrapeTarget { section: Section::News, language: Language::Nl, path: "/nl/denuo-nieuws" },
    ScrapeTarget { section: Section::News, language: Language::Fr, path: "/fr/actualites-denuo" },
    ScrapeTarget { section: Section::Standpunten, language: Language::Nl, path: "/nl/standpunten" },
    ScrapeTarget { section: Section::Dossiers, language: Language::Nl, path: "/nl/dossiers" },
    ScrapeTarget { section: Section::Committees, language: Language::Nl, path: "/nl/paritaire-comites" },
    ScrapeTarget { section: Section::Events, language: Language::Nl, path: "/nl/agenda" },
    ScrapeTarget { section: Section::Downloads, language: Language::Nl, path: "/nl/downloads" },
    ScrapeTarget { section: Section::AboutInfo, language: Language::Nl, path: "/nl/over-denuo" },
    ScrapeTarget { section: Section::PressArticles, language: Language::Nl, path: "/nl/denuo-de-pers-0" },
];

/// What a parser knows about the page it is reading.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Origin relative links resolve against.
    pub origin: &'a str,
    /// Absolute URL of the page itself.
    pub url: &'a str,
    pub language: Language,
}

impl<'a> PageContext<'a> {
    pub fn resolve(&self, reference: &str) -> String {
        crate::urls::resolve(reference, self.origin)
    }
}
