//! HTML content extraction
//!
//! This module turns raw HTML into structured page content:
//! - A best-effort title (document `<title>`, falling back to the first
//!   `<h1>`)
//! - The readable text of the page body, with scripts, styles, and
//!   navigation boilerplate excluded
//! - Every resolvable anchor target as an absolute URL
//!
//! Extraction is pure and total: malformed HTML degrades to empty output,
//! it never fails and performs no I/O.

use scraper::node::{Element, Node};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Tags whose subtrees never contribute readable text
const EXCLUDED_TAGS: &[&str] = &["script", "style", "noscript", "nav", "template"];

/// ARIA roles that mark navigation/boilerplate landmarks
const EXCLUDED_ROLES: &[&str] = &["navigation", "banner", "contentinfo"];

/// Extracted information from one HTML page
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// The page title; empty when the page has neither `<title>` nor `<h1>`
    pub title: String,

    /// Readable body text with boilerplate removed and whitespace collapsed
    pub content: String,

    /// Anchor targets resolved to absolute URLs, in document order,
    /// pre-normalization
    pub outbound_links: Vec<Url>,
}

/// Extracts title, readable content, and outbound links from HTML
///
/// # Arguments
///
/// * `html` - The raw HTML (possibly malformed; the parser recovers)
/// * `page_url` - The page's own URL, used to resolve relative hrefs
///
/// # Example
///
/// ```
/// use siphon::crawler::extract;
/// use url::Url;
///
/// let html = r#"<html><head><title>Hi</title></head><body><p>Text</p></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let extracted = extract(html, &page_url);
/// assert_eq!(extracted.title, "Hi");
/// assert_eq!(extracted.content, "Text");
/// ```
pub fn extract(html: &str, page_url: &Url) -> ExtractedContent {
    let document = Html::parse_document(html);

    ExtractedContent {
        title: extract_title(&document),
        content: extract_content(&document),
        outbound_links: extract_links(&document, page_url),
    }
}

/// Extracts the page title, preferring `<title>` over the first `<h1>`
fn extract_title(document: &Html) -> String {
    for selector in ["title", "h1"] {
        if let Ok(selector) = Selector::parse(selector) {
            if let Some(element) = document.select(&selector).next() {
                let text = element.text().collect::<String>();
                let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !text.is_empty() {
                    return text;
                }
            }
        }
    }

    String::new()
}

/// Collects the readable text of the body, skipping excluded subtrees
fn extract_content(document: &Html) -> String {
    let mut parts: Vec<String> = Vec::new();

    // The parser synthesizes <body> for well-formed documents; fall back
    // to the root element for anything stranger
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    collect_text(body, &mut parts);

    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, parts: &mut Vec<String>) {
    if is_excluded(element.value()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, parts);
                }
            }
            _ => {}
        }
    }
}

/// Checks whether an element's subtree is boilerplate rather than content
fn is_excluded(element: &Element) -> bool {
    if EXCLUDED_TAGS.contains(&element.name()) {
        return true;
    }

    if let Some(role) = element.attr("role") {
        if EXCLUDED_ROLES.contains(&role.to_lowercase().as_str()) {
            return true;
        }
    }

    if let Some(id) = element.id() {
        if id == "skip-link" || id == "skip-to-content" {
            return true;
        }
    }

    element
        .classes()
        .any(|class| class == "skip-link" || class == "skip-to-content")
}

/// Extracts all resolvable anchor targets as absolute URLs
fn extract_links(document: &Html, page_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(href, page_url) {
                    links.push(absolute);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None for hrefs that can never be crawled:
/// - `javascript:`, `mailto:`, `tel:` schemes and data URIs
/// - Fragment-only links (same-page anchors)
/// - Unparseable hrefs or non-HTTP(S) results
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match page_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/articles/post").unwrap()
    }

    fn extract_at(html: &str) -> ExtractedContent {
        extract(html, &page_url())
    }

    #[test]
    fn test_title_from_title_tag() {
        let html = r#"<html><head><title>Test Page</title></head><body></body></html>"#;
        assert_eq!(extract_at(html).title, "Test Page");
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let html = r#"<html><body><h1>Heading Title</h1><p>text</p></body></html>"#;
        assert_eq!(extract_at(html).title, "Heading Title");
    }

    #[test]
    fn test_title_whitespace_collapsed() {
        let html = "<html><head><title>  A \n  Title  </title></head><body></body></html>";
        assert_eq!(extract_at(html).title, "A Title");
    }

    #[test]
    fn test_no_title_is_empty() {
        let html = r#"<html><body><p>text only</p></body></html>"#;
        assert_eq!(extract_at(html).title, "");
    }

    #[test]
    fn test_content_from_body() {
        let html = r#"<html><body><p>Hello</p><p>world</p></body></html>"#;
        assert_eq!(extract_at(html).content, "Hello world");
    }

    #[test]
    fn test_script_and_style_excluded() {
        let html = r#"<html><body>
            <script>var x = 1;</script>
            <style>p { color: red; }</style>
            <p>Visible</p>
        </body></html>"#;
        assert_eq!(extract_at(html).content, "Visible");
    }

    #[test]
    fn test_nav_excluded() {
        let html = r#"<html><body><nav>Home About Contact</nav><p>Article</p></body></html>"#;
        assert_eq!(extract_at(html).content, "Article");
    }

    #[test]
    fn test_role_landmarks_excluded() {
        let html = r#"<html><body>
            <header role="banner">Site Header</header>
            <div role="navigation">Menu</div>
            <p>Body text</p>
            <footer role="contentinfo">Copyright</footer>
        </body></html>"#;
        assert_eq!(extract_at(html).content, "Body text");
    }

    #[test]
    fn test_plain_header_kept() {
        let html = r#"<html><body><header>Intro</header><p>Rest</p></body></html>"#;
        assert_eq!(extract_at(html).content, "Intro Rest");
    }

    #[test]
    fn test_skip_link_excluded() {
        let html = r##"<html><body><a class="skip-link" href="#main">Skip to content</a><p>Main</p></body></html>"##;
        assert_eq!(extract_at(html).content, "Main");
    }

    #[test]
    fn test_malformed_html_tolerated() {
        let html = "<html><body><p>Unclosed <div>nested";
        let extracted = extract_at(html);
        assert!(extracted.content.contains("Unclosed"));
        assert!(extracted.content.contains("nested"));
    }

    #[test]
    fn test_empty_input() {
        let extracted = extract_at("");
        assert_eq!(extracted.title, "");
        assert_eq!(extracted.content, "");
        assert!(extracted.outbound_links.is_empty());
    }

    #[test]
    fn test_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let links = extract_at(html).outbound_links;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://other.com/page");
    }

    #[test]
    fn test_relative_links_resolved() {
        let html = r#"<html><body>
            <a href="/top">Root-relative</a>
            <a href="sibling">Path-relative</a>
        </body></html>"#;
        let links = extract_at(html).outbound_links;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].as_str(), "https://example.com/top");
        assert_eq!(links[1].as_str(), "https://example.com/articles/sibling");
    }

    #[test]
    fn test_special_schemes_skipped() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:a@example.com">Mail</a>
            <a href="tel:+123">Tel</a>
            <a href="data:text/plain,x">Data</a>
            <a href="#section">Anchor</a>
            <a href="/real">Real</a>
        </body></html>"##;
        let links = extract_at(html).outbound_links;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.com/real");
    }

    #[test]
    fn test_links_in_document_order() {
        let html = r#"<html><body>
            <a href="/b">B</a>
            <a href="/a">A</a>
            <a href="/c">C</a>
        </body></html>"#;
        let links = extract_at(html).outbound_links;
        let paths: Vec<&str> = links.iter().map(|u| u.path()).collect();
        assert_eq!(paths, vec!["/b", "/a", "/c"]);
    }

    #[test]
    fn test_links_inside_nav_still_reported() {
        // Navigation is boilerplate for content purposes, but its links are
        // still crawlable anchors
        let html = r#"<html><body><nav><a href="/menu">Menu</a></nav><p>Text</p></body></html>"#;
        let extracted = extract_at(html);
        assert_eq!(extracted.content, "Text");
        assert_eq!(extracted.outbound_links.len(), 1);
    }
}
