//! Anchor extraction from parsed HTML.
//!
//! Walks every `<a href>` in document order. With a base URL, hrefs are
//! resolved against it; without one, only absolute `http(s)://` hrefs are
//! kept. Everything that survives goes through [`crate::filter`].

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::filter::is_downloadable;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href]").expect("static anchor selector 'a[href]' must parse")
});

/// Links that passed the extension filter, plus how many hrefs were seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    /// Absolute URLs in document order; duplicates retained.
    pub links: Vec<String>,
    /// Every anchor `href` attribute encountered, before resolution or filtering.
    pub total_hrefs: usize,
}

/// Collects downloadable links from `document`.
pub fn extract_links(document: &Html, base: Option<&Url>) -> ExtractedLinks {
    let mut out = ExtractedLinks::default();

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        out.total_hrefs += 1;

        let resolved = match base {
            Some(base) => match base.join(href) {
                Ok(u) => u.to_string(),
                Err(e) => {
                    tracing::trace!(href, "skipping unresolvable href: {}", e);
                    continue;
                }
            },
            None if is_absolute_http(href) => href.to_string(),
            None => continue,
        };

        if is_downloadable(&resolved) {
            out.links.push(resolved);
        }
    }

    tracing::info!(
        total_hrefs = out.total_hrefs,
        downloadable = out.links.len(),
        "extracted links"
    );
    out
}

/// Parses `html` and extracts links from it.
pub fn extract_links_from_html(html: &str, base: Option<&Url>) -> ExtractedLinks {
    let document = Html::parse_document(html);
    extract_links(&document, base)
}

fn is_absolute_http(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn relative_href_resolves_against_base() {
        let b = base("http://site/dir/");
        let got = extract_links_from_html(r#"<a href="file.zip">x</a>"#, Some(&b));
        assert_eq!(got.links, vec!["http://site/dir/file.zip"]);

        let got = extract_links_from_html(r#"<a href="../other.png">x</a>"#, Some(&b));
        assert_eq!(got.links, vec!["http://site/other.png"]);
    }

    #[test]
    fn absolute_href_unchanged_with_base() {
        let b = base("http://site/dir/");
        let got = extract_links_from_html(
            r#"<a href="https://cdn.example.com/a.mp4">x</a>"#,
            Some(&b),
        );
        assert_eq!(got.links, vec!["https://cdn.example.com/a.mp4"]);
    }

    #[test]
    fn without_base_only_absolute_kept() {
        let got = extract_links_from_html(
            r#"<a href="http://abs.example/x.mp3">a</a><a href="/relative.mp3">b</a>"#,
            None,
        );
        assert_eq!(got.links, vec!["http://abs.example/x.mp3"]);
        assert_eq!(got.total_hrefs, 2);
    }

    #[test]
    fn filters_and_keeps_document_order_and_duplicates() {
        let html = r#"
            <html><body>
              <a href="b.pdf">b</a>
              <div><p><a href="page.html">skip</a></p><a href="a.jpg">a</a></div>
              <a href="b.pdf">again</a>
              <a name="anchor-without-href">none</a>
            </body></html>
        "#;
        let b = base("https://example.com/docs/index.html");
        let got = extract_links_from_html(html, Some(&b));
        assert_eq!(
            got.links,
            vec![
                "https://example.com/docs/b.pdf",
                "https://example.com/docs/a.jpg",
                "https://example.com/docs/b.pdf",
            ]
        );
        assert_eq!(got.total_hrefs, 4);
    }

    #[test]
    fn query_filename_links_kept() {
        let b = base("https://example.com/");
        let got = extract_links_from_html(r#"<a href="dl?f=report.docx">r</a>"#, Some(&b));
        assert_eq!(got.links, vec!["https://example.com/dl?f=report.docx"]);
    }

    #[test]
    fn unresolvable_href_skipped() {
        let b = base("https://example.com/");
        let got = extract_links_from_html(r#"<a href="http://[::1">bad</a>"#, Some(&b));
        assert!(got.links.is_empty());
        assert_eq!(got.total_hrefs, 1);
    }
}
