use anyhow::Result;
use ingest::{db_path, open_shared, run_scrape, ScrapeConfig};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ScrapeConfig::from_env();
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let db_path = db_path(&data_dir);

    tracing::info!(db = %db_path.display(), base_url = %config.base_url, "denuo ingest");

    let db = open_shared(&db_path)?;
    tracing::info!("database initialized");

    let report = run_scrape(&db, &config).await;
    for section in &report.sections {
        match &section.error {
            None => tracing::info!(section = %section.section, count = section.items, "section scraped"),
            Some(error) => tracing::error!(
                section = %section.section,
                count = section.items,
                error = %error,
                "section failed"
            ),
        }
    }

    tracing::info!(
        run_id = %report.run_id,
        total = report.total_items,
        "ingest complete"
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
