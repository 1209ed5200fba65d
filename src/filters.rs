#![expect(clippy::inline_always)]

use std::fmt::Display;

use askama::Values;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Memo text as HTML. Raw HTML in the source is shown as text and links
/// that are not http(s) or mailto point nowhere.
#[askama::filter_fn]
pub fn markdown<T: Display>(s: T, _: &dyn Values) -> askama::Result<String> {
    Ok(render_markdown(&s.to_string()))
}

#[must_use]
pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) if !is_safe_link(&dest_url) => Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::Borrowed("#"),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) if !is_safe_link(&dest_url) => Event::Start(Tag::Image {
                link_type,
                dest_url: CowStr::Borrowed("#"),
                title,
                id,
            }),
            other => other,
        });

    let mut output = String::new();

    html::push_html(&mut output, parser);

    output
}

pub(crate) fn is_safe_link(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("https://") || url.starts_with("http://") || url.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::render_markdown;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown("Read **chapter 4** first");
        assert_eq!(html.trim(), "<p>Read <strong>chapter 4</strong> first</p>");
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn script_links_are_defused() {
        let html = render_markdown("[click](javascript:alert(1)) and [docs](https://example.edu)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"<a href="#">click</a>"##));
        assert!(html.contains(r#"<a href="https://example.edu">docs</a>"#));
    }
}
