//! Plain-text rendering of entry bodies.
//!
//! The fragment is parsed with `scraper` (html5ever) and the resulting tree
//! is walked: block elements become line breaks, list items get a bullet,
//! links keep their target and `script`/`style` are dropped. Comments never
//! reach the output.

use scraper::{ElementRef, Html};

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "blockquote", "pre",
    "table", "section", "article", "header", "footer",
];

/// Render an HTML fragment as readable plain text.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    walk(fragment.root_element(), &mut out);
    tidy(&out)
}

fn walk(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            push_text(out, text);
        } else if let Some(child) = ElementRef::wrap(child) {
            render_element(child, out);
        }
    }
}

fn render_element(element: ElementRef<'_>, out: &mut String) {
    let el = element.value();
    let name = el.name();

    match name {
        "script" | "style" | "template" => return,
        "br" | "hr" => {
            newline(out);
            return;
        }
        "img" => {
            if let Some(alt) = el.attr("alt").filter(|a| !a.is_empty()) {
                push_text(out, alt);
            }
            return;
        }
        "li" => {
            newline(out);
            out.push_str("* ");
        }
        _ if BLOCK_TAGS.contains(&name) => newline(out),
        _ => {}
    }

    walk(element, out);

    match name {
        "a" => {
            if let Some(href) = el.attr("href").map(str::trim).filter(|h| !h.is_empty()) {
                if !out.trim_end().ends_with(href) {
                    out.push_str(" ( ");
                    out.push_str(href);
                    out.push_str(" )");
                }
            }
        }
        _ if BLOCK_TAGS.contains(&name) => newline(out),
        _ => {}
    }
}

/// Append `text` with runs of ASCII whitespace collapsed.
///
/// Non-breaking spaces are content, not layout, and survive.
fn push_text(out: &mut String, text: &str) {
    let mut words = text.split_ascii_whitespace().peekable();
    let leading = text.starts_with(|c: char| c.is_ascii_whitespace());
    let trailing = text.ends_with(|c: char| c.is_ascii_whitespace());

    if words.peek().is_none() {
        if leading && !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        return;
    }

    if leading && !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }

    let mut first = true;
    for word in words {
        if !first {
            out.push(' ');
        }
        out.push_str(word);
        first = false;
    }

    if trailing {
        out.push(' ');
    }
}

fn newline(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

/// Trim every line and collapse runs of blank lines to a single one.
fn tidy(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(|l| l.trim_matches(|c: char| c.is_ascii_whitespace())) {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
