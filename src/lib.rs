//! # rss2email
//!
//! Polls a list of syndication feeds and emails every entry that has not
//! been delivered before, as a text + HTML message through the local
//! sendmail.
//!
//! ## Architecture
//!
//! ```text
//! FeedList → Fetcher → Normalizer → SeenStore? → Envelope → Mailer → SeenStore
//! ```
//!
//! One run processes every feed sequentially and exits; schedule it with
//! cron or a systemd timer.
//!
//! ```bash
//! echo https://blog.rust-lang.org/feed.xml >> ~/.rss2email/feeds
//! rss2email --verbose
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// seen store, mailer and feed processor.
pub mod app;

/// Command-line interface using clap, and the run driver.
pub mod cli;

/// Configuration file and on-disk layout under `~/.rss2email`.
pub mod config;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): one feed entry with its SHA-1 identifier
/// - [`FeedList`](domain::FeedList): the user's list of feed URLs
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for feed fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Message composition and delivery.
///
/// - [`Envelope`](mailer::Envelope) / [`Message`](mailer::Message): MIME composition
/// - [`Mailer`](mailer::Mailer): Async trait for mail transports
/// - [`SendmailMailer`](mailer::SendmailMailer): one sendmail process per message
pub mod mailer;

/// Feed parsing.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0
/// into [`Entry`](domain::Entry) values.
pub mod normalizer;

/// The per-feed fetch, dedup and deliver loop.
pub mod processor;

/// HTML to plain text.
pub mod render;

/// Delivered-entry markers.
///
/// - [`SeenStore`](store::SeenStore): Trait with the fail-open read policy
/// - [`FsSeenStore`](store::FsSeenStore): One file per identifier
pub mod store;
