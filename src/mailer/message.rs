use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::config::ConfigError;
use crate::domain::{identifier_for, Entry};
use crate::render::html_to_text;

pub const DEFAULT_FROM: &str = "user@rss2email.invalid";
pub const DEFAULT_SUBJECT_PREFIX: &str = "[rss2email]";

/// Addressing shared by every message of a run.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub from: String,
    /// `None` when no recipient could be resolved; composing then fails.
    pub to: Option<String>,
    pub subject_prefix: String,
}

impl Envelope {
    pub fn new(to: Option<String>) -> Self {
        Self {
            from: DEFAULT_FROM.to_string(),
            to,
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
        }
    }

    /// Build the text + HTML message for one entry.
    pub fn compose(&self, feed_url: &str, entry: &Entry) -> Result<Message> {
        let to = self
            .to
            .clone()
            .filter(|to| !to.trim().is_empty())
            .ok_or(ConfigError::MissingRecipient)?;

        let subject = if self.subject_prefix.is_empty() {
            entry.display_title().to_string()
        } else {
            format!("{} {}", self.subject_prefix, entry.display_title())
        };

        let mut text = html_to_text(entry.display_content());
        if let Some(link) = &entry.link {
            if !text.is_empty() {
                text.push_str("\n\n");
            }
            text.push_str(link);
        }

        Ok(Message {
            from: self.from.clone(),
            to,
            subject,
            text,
            html: entry.display_content().to_string(),
            link: entry.link.clone(),
            feed_url: feed_url.to_string(),
            date: Utc::now(),
        })
    }
}

/// A composed notification, ready for a [`Mailer`](crate::mailer::Mailer).
#[derive(Debug, Clone)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub link: Option<String>,
    pub feed_url: String,
    pub date: DateTime<Utc>,
}

impl Message {
    /// Render as a `multipart/alternative` MIME document with `\n` line
    /// endings, which is what local sendmail implementations expect.
    pub fn to_mime(&self) -> String {
        let text = encode_body(&self.text);
        let html = encode_body(&self.html);
        // "=_" never occurs in quoted-printable output
        let boundary = format!("=_{}", identifier_for(&format!("{}{}", text, html)));

        let mut out = String::new();
        push_header(&mut out, "From", &self.from);
        push_header(&mut out, "To", &self.to);
        push_header(&mut out, "Subject", &encode_header(&self.subject));
        push_header(&mut out, "Date", &self.date.to_rfc2822());
        push_header(&mut out, "MIME-Version", "1.0");
        if let Some(link) = &self.link {
            push_header(&mut out, "X-RSS-Link", link);
        }
        push_header(&mut out, "X-RSS-Feed", &self.feed_url);
        push_header(
            &mut out,
            "Content-Type",
            &format!("multipart/alternative; boundary=\"{}\"", boundary),
        );
        out.push('\n');

        for (content_type, body) in [("text/plain", text), ("text/html", html)] {
            out.push_str(&format!("--{}\n", boundary));
            out.push_str(&format!("Content-Type: {}; charset=UTF-8\n", content_type));
            out.push_str("Content-Transfer-Encoding: quoted-printable\n\n");
            out.push_str(&body);
            out.push('\n');
        }
        out.push_str(&format!("--{}--\n", boundary));

        out
    }
}

/// Preferred header line length; RFC 5322 caps lines at 998.
const FOLD_AT: usize = 78;

/// Write one header, folding at spaces once a line passes [`FOLD_AT`].
///
/// CR and LF in `value` become spaces so a value can never start a new
/// header. A single word longer than a line is left unbroken.
fn push_header(out: &mut String, name: &str, value: &str) {
    let value: String = value
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect();

    out.push_str(name);
    out.push(':');
    let mut line_len = name.len() + 1;
    let mut line_has_word = false;

    for word in value.trim().split(' ') {
        if line_has_word && !word.is_empty() && line_len + 1 + word.len() > FOLD_AT {
            out.push('\n');
            line_len = 0;
        }
        out.push(' ');
        out.push_str(word);
        line_len += 1 + word.len();
        line_has_word |= !word.is_empty();
    }
    out.push('\n');
}

fn encode_body(body: &str) -> String {
    let crlf = body.replace("\r\n", "\n").replace('\n', "\r\n");
    quoted_printable::encode_to_str(crlf).replace("\r\n", "\n")
}

/// RFC 2047 `Q` encoding for header values that are not plain ASCII.
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    const MAX_WORD: usize = 60;
    let mut words = Vec::new();
    let mut current = String::new();

    for c in value.chars() {
        let mut encoded = String::new();
        let mut buf = [0u8; 4];
        for byte in c.encode_utf8(&mut buf).bytes() {
            match byte {
                b' ' => encoded.push('_'),
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'!' | b'*' | b'+' | b'-' | b'/' => {
                    encoded.push(byte as char)
                }
                _ => encoded.push_str(&format!("={:02X}", byte)),
            }
        }
        if !current.is_empty() && current.len() + encoded.len() > MAX_WORD {
            words.push(std::mem::take(&mut current));
        }
        current.push_str(&encoded);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| format!("=?UTF-8?Q?{}?=", w))
        .collect::<Vec<_>>()
        .join(" ")
}
