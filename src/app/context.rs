use std::sync::Arc;
use std::time::Duration;

use crate::app::Result;
use crate::config::{Config, Paths};
use crate::fetcher::HttpFetcher;
use crate::mailer::{Envelope, SendmailMailer};
use crate::processor::FeedProcessor;
use crate::store::FsSeenStore;

/// Wires the collaborators for one run.
pub struct AppContext {
    pub paths: Paths,
    pub processor: FeedProcessor,
}

impl AppContext {
    pub fn new(paths: Paths, config: Config) -> Result<Self> {
        let recipient = config.resolve_recipient();
        if recipient.is_none() {
            tracing::warn!("No recipient configured and $LOGNAME is unset; nothing can be sent");
        }

        let fetcher = Arc::new(HttpFetcher::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?);
        let store = Arc::new(FsSeenStore::new(&paths.seen_dir));
        let mailer = Arc::new(SendmailMailer::new(&config.sendmail).with_args(config.sendmail_args));
        let envelope = Envelope {
            from: config.from,
            to: recipient,
            subject_prefix: config.subject_prefix,
        };

        Ok(Self::with_processor(
            paths,
            FeedProcessor::new(fetcher, store, mailer, envelope),
        ))
    }

    pub fn with_processor(paths: Paths, processor: FeedProcessor) -> Self {
        Self { paths, processor }
    }
}
