use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Connection shared between the scrape pipeline and the read side.
pub type SharedDb = Arc<Mutex<Connection>>;

pub const DB_FILE_NAME: &str = "denuo.db";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS news (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    summary TEXT,
    content TEXT,
    url TEXT NOT NULL UNIQUE,
    category TEXT,
    publication_date TEXT,
    language TEXT NOT NULL,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS standpunten (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    content TEXT,
    url TEXT NOT NULL UNIQUE,
    publication_year TEXT,
    document_type TEXT,
    language TEXT NOT NULL,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS dossiers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    content TEXT,
    url TEXT NOT NULL UNIQUE,
    categories TEXT NOT NULL DEFAULT '[]',
    language TEXT NOT NULL,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS committees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    psc_number TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT,
    content TEXT,
    url TEXT,
    sector TEXT,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    event_type TEXT,
    event_date TEXT,
    event_time TEXT,
    location_name TEXT,
    location_address TEXT,
    url TEXT,
    language TEXT NOT NULL,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(title, event_date, language)
);

CREATE TABLE IF NOT EXISTS downloads (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    file_type TEXT,
    download_url TEXT NOT NULL UNIQUE,
    page_url TEXT,
    categories TEXT NOT NULL DEFAULT '[]',
    languages_available TEXT,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS about_info (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    section_title TEXT NOT NULL,
    content TEXT NOT NULL,
    section_type TEXT NOT NULL,
    url TEXT,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(section_title, url)
);

CREATE TABLE IF NOT EXISTS press_articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    summary TEXT,
    content TEXT,
    url TEXT NOT NULL UNIQUE,
    categories TEXT NOT NULL DEFAULT '[]',
    publication_date TEXT,
    source TEXT,
    language TEXT NOT NULL,
    scraped_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS scrape_metadata (
    section TEXT PRIMARY KEY,
    last_scraped TEXT NOT NULL,
    status TEXT NOT NULL,
    items_scraped INTEGER NOT NULL DEFAULT 0,
    error_message TEXT
);

CREATE INDEX IF NOT EXISTS idx_news_language ON news(language);
CREATE INDEX IF NOT EXISTS idx_news_publication_date ON news(publication_date);
CREATE INDEX IF NOT EXISTS idx_standpunten_year ON standpunten(publication_year);
CREATE INDEX IF NOT EXISTS idx_committees_sector ON committees(sector);
CREATE INDEX IF NOT EXISTS idx_press_publication_date ON press_articles(publication_date);
"#;

/// Database path under a data directory.
pub fn db_path(data_dir: impl AsRef<Path>) -> PathBuf {
    data_dir.as_ref().join(DB_FILE_NAME)
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database {}", path.display()))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("failed to create schema")?;
    Ok(())
}

/// Opens the database, creates the schema and wraps the connection for
/// sharing across tasks.
pub fn open_shared(path: &Path) -> Result<SharedDb> {
    let conn = open_db(path)?;
    init_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}
