//! Per-feed delivery loop.
//!
//! For one URL: fetch, parse, then for each entry in document order skip it
//! if a seen marker exists, otherwise compose and send it and write the
//! marker only once the transport has accepted the message. A crash between
//! send and marker write means one duplicate email on the next run, never a
//! lost one.

use std::sync::Arc;

use crate::app::Result;
use crate::domain::Entry;
use crate::fetcher::Fetcher;
use crate::mailer::{Envelope, Mailer};
use crate::normalizer::Normalizer;
use crate::store::SeenStore;

/// Counters for one processed feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedReport {
    pub entries: usize,
    pub already_seen: usize,
    pub delivered: usize,
    /// Delivery attempts that failed; these entries are retried next run.
    pub failed: usize,
    /// Delivered but the marker could not be written.
    pub unrecorded: usize,
    /// Fetch or parse failed, the feed was skipped.
    pub feed_error: bool,
}

pub struct FeedProcessor {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
    store: Arc<dyn SeenStore + Send + Sync>,
    mailer: Arc<dyn Mailer + Send + Sync>,
    envelope: Envelope,
}

impl FeedProcessor {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<dyn SeenStore + Send + Sync>,
        mailer: Arc<dyn Mailer + Send + Sync>,
        envelope: Envelope,
    ) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
            store,
            mailer,
            envelope,
        }
    }

    /// Process one feed. Failures are logged and reflected in the report,
    /// never returned.
    pub async fn process(&self, url: &str) -> FeedReport {
        tracing::debug!("Fetching {}", url);

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Error fetching {}: {}", url, e);
                return FeedReport {
                    feed_error: true,
                    ..Default::default()
                };
            }
        };

        let entries = match self.normalizer.normalize(&body) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error parsing {}: {}", url, e);
                return FeedReport {
                    feed_error: true,
                    ..Default::default()
                };
            }
        };

        tracing::debug!("Found {} entries in {}", entries.len(), url);

        let mut report = FeedReport {
            entries: entries.len(),
            ..Default::default()
        };

        for entry in &entries {
            let id = entry.identifier();
            if self.store.has_seen(&id) {
                report.already_seen += 1;
                continue;
            }

            tracing::debug!("New entry {} ({})", entry.guid, id);

            if let Err(e) = self.deliver(url, entry).await {
                tracing::error!(
                    "Failed to deliver \"{}\" from {}: {}",
                    entry.display_title(),
                    url,
                    e
                );
                report.failed += 1;
                continue;
            }

            report.delivered += 1;
            tracing::info!("Delivered \"{}\" from {}", entry.display_title(), url);

            if let Err(e) = self.store.record_seen(&id, entry.display_link()) {
                tracing::warn!(
                    "Delivered \"{}\" but could not record it, it will be sent again: {}",
                    entry.display_title(),
                    e
                );
                report.unrecorded += 1;
            }
        }

        report
    }

    async fn deliver(&self, url: &str, entry: &Entry) -> Result<()> {
        let message = self.envelope.compose(url, entry)?;
        self.mailer.send(&message).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::app::{Result, Rss2EmailError};
    use crate::fetcher::Fetcher;
    use crate::mailer::{Mailer, Message};

    /// Serves canned bodies and records every requested URL.
    #[derive(Default)]
    pub struct FakeFetcher {
        pub bodies: Mutex<HashMap<String, String>>,
        pub requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn with(url: &str, body: &str) -> Self {
            let fetcher = Self::default();
            fetcher.set(url, body);
            fetcher
        }

        pub fn set(&self, url: &str, body: &str) {
            self.bodies
                .lock()
                .unwrap()
                .insert(url.to_string(), body.to_string());
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            self.bodies
                .lock()
                .unwrap()
                .get(url)
                .map(|b| b.clone().into_bytes())
                .ok_or_else(|| {
                    Rss2EmailError::Io(std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        format!("connection refused: {}", url),
                    ))
                })
        }
    }

    /// Collects sent messages; subjects listed in `reject` fail.
    #[derive(Default)]
    pub struct FakeMailer {
        pub sent: Mutex<Vec<Message>>,
        pub reject: Mutex<HashSet<String>>,
    }

    impl FakeMailer {
        pub fn sent_subjects(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|m| m.subject.clone())
                .collect()
        }

        pub fn reject(&self, subject: &str) {
            self.reject.lock().unwrap().insert(subject.to_string());
        }

        pub fn accept_all(&self) {
            self.reject.lock().unwrap().clear();
        }
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn send(&self, message: &Message) -> Result<()> {
            if self.reject.lock().unwrap().contains(&message.subject) {
                return Err(Rss2EmailError::Delivery("sendmail exited with 75".into()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    pub fn rss(items: &[(&str, &str)]) -> String {
        let items: String = items
            .iter()
            .map(|(guid, title)| {
                format!(
                    "<item><title>{title}</title><link>https://example.com/{guid}</link>\
                     <guid>{guid}</guid><description>&lt;p&gt;{title} body&lt;/p&gt;</description></item>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Test</title>{items}</channel></rss>"#
        )
    }
}
