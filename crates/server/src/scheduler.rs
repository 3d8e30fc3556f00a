use std::time::Duration;

use metrics::counter;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use ingest::{run_scrape, ScrapeConfig, SharedDb};

/// Starts a scrape run in the background and returns immediately.
pub fn spawn_scrape(db: SharedDb, config: ScrapeConfig, trigger: &'static str) -> JoinHandle<()> {
    counter!("scrape_runs_total", "trigger" => trigger).increment(1);
    tracing::info!(trigger, "scrape run started");

    tokio::spawn(async move {
        let report = run_scrape(&db, &config).await;
        for section in &report.sections {
            counter!("scrape_items_total", "section" => section.section.as_str())
                .increment(section.items as u64);
        }
        tracing::info!(
            trigger,
            run_id = %report.run_id,
            total = report.total_items,
            failed = report.failed_sections().count(),
            "scrape run complete"
        );
    })
}

/// Scrapes every `every`, starting one full interval after boot. Returns
/// `None` when `every` is zero. A tick without a database is logged and
/// skipped.
pub fn start(db: Option<SharedDb>, config: ScrapeConfig, every: Duration) -> Option<JoinHandle<()>> {
    if every.is_zero() {
        tracing::info!("scheduled scraping disabled");
        return None;
    }
    tracing::info!(interval_secs = every.as_secs(), "scheduled scraping enabled");

    Some(tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + every, every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticks.tick().await;
            match &db {
                Some(db) => {
                    spawn_scrape(db.clone(), config.clone(), "scheduled");
                }
                None => tracing::error!("database not available, skipping scheduled scrape"),
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_interval_disables_schedule() {
        assert!(start(None, ScrapeConfig::default(), Duration::ZERO).is_none());
    }

    #[tokio::test]
    async fn scheduled_loop_runs_until_aborted() {
        let handle = start(None, ScrapeConfig::default(), Duration::from_secs(3600)).unwrap();
        assert!(!handle.is_finished());
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());
    }
}
