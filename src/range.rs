use std::path::PathBuf;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::error::Result;
use crate::query::{parse_day, QueryInstant};

/// Something that can fetch and persist a single day.
#[allow(async_fn_in_trait)]
pub trait DayFetcher {
    async fn fetch_day(&self, query: &QueryInstant) -> Result<PathBuf>;
}

/// Fetches every day from `start` to `end` inclusive, oldest first.
///
/// Both ends must be `YYYY-MM-DD`. A start after the end yields no requests.
/// The first failing day aborts the range; files saved before it stay on disk.
pub async fn download_range<F: DayFetcher>(
    fetcher: &F,
    start: &str,
    end: &str,
    delay: Duration,
) -> Result<Vec<PathBuf>> {
    let start = parse_day(start)?;
    let end = parse_day(end)?;

    let mut saved = Vec::new();
    let mut day = start;
    while day <= end {
        let path = fetcher.fetch_day(&QueryInstant::from_date(day)?).await?;
        saved.push(path);

        if day < end && !delay.is_zero() {
            debug!(?delay, "waiting before next day");
            sleep(delay).await;
        }

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(saved)
}
