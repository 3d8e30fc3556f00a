pub mod config;
pub mod db;
pub mod dedupe;
pub mod extract;
pub mod fetcher;
pub mod lexicon;
pub mod parser_about;
pub mod parser_committees;
pub mod parser_downloads;
pub mod parser_dossiers;
pub mod parser_events;
pub mod parser_news;
pub mod parser_press;
pub mod parser_standpunten;
pub mod pipeline;
pub mod store;
pub mod targets;
pub mod text;
pub mod urls;

pub use config::ScrapeConfig;
pub use db::{db_path, init_schema, open_db, open_shared, SharedDb};
pub use dedupe::{dedupe, dedupe_by};
pub use fetcher::{build_client, fetch_page};
pub use parser_about::parse_about;
pub use parser_committees::parse_committees;
pub use parser_downloads::parse_downloads;
pub use parser_dossiers::parse_dossiers;
pub use parser_events::parse_events;
pub use parser_news::parse_news;
pub use parser_press::parse_press_articles;
pub use parser_standpunten::parse_standpunten;
pub use pipeline::{parse_page, run_scrape, Batch, ScrapeReport, SectionReport};
pub use store::{
    store_about_info, store_committees, store_downloads, store_dossiers, store_events, store_news,
    store_press_articles, store_standpunten, update_scrape_metadata,
};
pub use targets::{PageContext, ScrapeTarget, TARGETS};
pub use text::normalize;
pub use urls::resolve;
