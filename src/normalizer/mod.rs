use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{Result, Rss2EmailError};
use crate::domain::Entry;

/// Parses RSS, Atom and JSON Feed documents into [`Entry`] values, in
/// document order.
#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Entry>> {
        let feed = parser::parse(body).map_err(|e| Rss2EmailError::FeedParse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .map(|entry| {
                let link = entry.links.first().map(|l| l.href.clone());
                // Fall back to the permalink when the source supplies no id
                let guid = if entry.id.is_empty() {
                    link.clone().unwrap_or_default()
                } else {
                    entry.id
                };

                let content = entry
                    .content
                    .and_then(|c| c.body)
                    .or_else(|| entry.summary.map(|s| s.content));

                Entry {
                    guid,
                    title: entry
                        .title
                        .map(|t| decode_html_entities(&t.content).to_string()),
                    link,
                    content,
                }
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test Feed</title>
    <description>A test feed</description>
    <item>
      <title>Fish &amp;amp; Chips</title>
      <link>https://example.com/item1</link>
      <guid>item-1</guid>
      <description>Short summary</description>
      <content:encoded><![CDATA[<p>Full <b>body</b></p>]]></content:encoded>
    </item>
    <item>
      <title>Test Item 2</title>
      <link>https://example.com/item2</link>
      <guid>item-2</guid>
      <description>This is item 2</description>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Test Feed</title>
  <entry>
    <title>Atom Entry 1</title>
    <link href="https://example.com/atom1"/>
    <id>atom-entry-1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>This is Atom entry 1</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].guid, "item-1");
        assert_eq!(entries[0].link, Some("https://example.com/item1".into()));
        assert_eq!(entries[1].guid, "item-2");
    }

    #[test]
    fn test_title_entities_decoded() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();
        assert_eq!(entries[0].title, Some("Fish & Chips".into()));
    }

    #[test]
    fn test_content_preferred_over_summary() {
        let entries = Normalizer::new().normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries[0].content, Some("<p>Full <b>body</b></p>".into()));
        assert_eq!(entries[1].content, Some("This is item 2".into()));
    }

    #[test]
    fn test_parse_atom() {
        let entries = Normalizer::new().normalize(ATOM_SAMPLE.as_bytes()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].guid, "atom-entry-1");
        assert_eq!(entries[0].title, Some("Atom Entry 1".into()));
        assert_eq!(entries[0].link, Some("https://example.com/atom1".into()));
        assert_eq!(entries[0].content, Some("This is Atom entry 1".into()));
    }

    #[test]
    fn test_guid_determinism() {
        let normalizer = Normalizer::new();
        let first = normalizer.normalize(RSS_SAMPLE.as_bytes()).unwrap();
        let second = normalizer.normalize(RSS_SAMPLE.as_bytes()).unwrap();

        assert_eq!(first[0].identifier(), second[0].identifier());
        assert_eq!(first[1].identifier(), second[1].identifier());
    }

    #[test]
    fn test_malformed_feed_is_parse_error() {
        let err = Normalizer::new()
            .normalize(b"<html><body>not a feed</body></html>")
            .unwrap_err();
        assert!(matches!(err, Rss2EmailError::FeedParse(_)));
    }
}
