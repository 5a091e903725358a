use crate::app::{AppContext, Result};
use crate::domain::FeedList;
use crate::processor::FeedReport;

/// Totals for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds: usize,
    pub feed_errors: usize,
    pub delivered: usize,
    pub failed: usize,
    /// Delivered, but the seen marker could not be written.
    pub unrecorded: usize,
}

impl RunSummary {
    fn add(&mut self, report: &FeedReport) {
        self.feeds += 1;
        self.delivered += report.delivered;
        self.failed += report.failed;
        self.unrecorded += report.unrecorded;
        if report.feed_error {
            self.feed_errors += 1;
        }
    }
}

/// Process every feed in the feed list, one after another, in file order.
///
/// Only a missing or unreadable feed list is an error; per-feed failures
/// are logged and counted.
pub async fn run(ctx: &AppContext) -> Result<RunSummary> {
    let feeds = FeedList::load(&ctx.paths.feeds)?;

    if feeds.is_empty() {
        tracing::warn!("No feeds listed in {}", ctx.paths.feeds.display());
    }

    let mut summary = RunSummary::default();
    for url in feeds.urls() {
        let report = ctx.processor.process(url).await;
        summary.add(&report);
    }

    tracing::info!(
        "Run complete: {} feeds, {} delivered, {} failed deliveries, {} unrecorded, {} feed errors",
        summary.feeds,
        summary.delivered,
        summary.failed,
        summary.unrecorded,
        summary.feed_errors
    );

    Ok(summary)
}
