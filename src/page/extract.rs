use std::collections::BTreeSet;

use scraper::{Html, Selector};
use url::{Origin, Url};

use crate::sitemap::PageRecord;

fn attr_values<'a>(html: &'a Html, css: &str, attr: &str) -> Vec<&'a str> {
    let selector = Selector::parse(css).unwrap();
    html.select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .collect()
}

/// Guessed from the path extension alone, never from response headers.
fn is_html_or_unknown(url: &Url) -> bool {
    match mime_guess::from_path(url.path()).first_raw() {
        Some(mime) => mime == "text/html",
        None => true,
    }
}

/// Same-origin page links on `content`, resolved against `root` with fragments dropped.
pub fn extract_links(root: &Url, origin: &Origin, content: &str) -> BTreeSet<String> {
    let html = Html::parse_document(content);
    attr_values(&html, "a[href]", "href")
        .into_iter()
        .filter_map(|href| root.join(href).ok())
        .filter(|url| &url.origin() == origin)
        .filter(is_html_or_unknown)
        .map(|mut url| {
            url.set_fragment(None);
            url.to_string()
        })
        .collect()
}

/// Images, stylesheets/icons and scripts on `content`, from any origin.
pub fn extract_assets(root: &Url, content: &str) -> BTreeSet<String> {
    let html = Html::parse_document(content);
    attr_values(&html, "img[src]", "src")
        .into_iter()
        .chain(attr_values(&html, "link[href]", "href"))
        .chain(attr_values(&html, "script[src]", "src"))
        .filter_map(|path| root.join(path).ok())
        .map(|url| url.to_string())
        .collect()
}

pub fn read_page(root: &Url, origin: &Origin, content: &str) -> PageRecord {
    let record = PageRecord {
        links: extract_links(root, origin, content),
        assets: extract_assets(root, content),
    };
    tracing::debug!(
        "Found {} links and {} assets",
        record.links.len(),
        record.assets.len()
    );
    record
}
