//! Read side of the Denuo content store: filtered searches and listings
//! over the tables the ingest pipeline fills.

pub mod about;
pub mod committees;
pub mod dossiers;
pub mod downloads;
pub mod events;
pub mod news;
pub mod press;
mod query;
pub mod standpunten;
pub mod status;

pub use about::get_about_info;
pub use committees::{get_all_committees, search_committees};
pub use dossiers::{get_all_dossiers, search_dossiers};
pub use downloads::{get_all_downloads, search_downloads};
pub use events::{get_all_events, get_upcoming_events, parse_event_date};
pub use news::{get_news_by_id, get_recent_news, search_news};
pub use press::{get_recent_press_articles, search_press_articles};
pub use standpunten::{get_all_standpunten, search_standpunten};
pub use status::list_scrape_metadata;
