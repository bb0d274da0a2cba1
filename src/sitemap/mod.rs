use std::collections::{BTreeMap, BTreeSet, HashSet};

mod render;

pub use render::to_listing;

/// Links and assets gathered from one fetched page. Empty while the page is still pending.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct PageRecord {
    pub links: BTreeSet<String>,
    pub assets: BTreeSet<String>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Sitemap {
    pub root: String,
    pub pages: BTreeMap<String, PageRecord>,
    seen: HashSet<String>,
}

impl Sitemap {
    pub fn new(root: String) -> Self {
        Sitemap {
            seen: HashSet::from([root.clone()]),
            root,
            pages: BTreeMap::new(),
        }
    }

    /// Inserts a pending entry for `url`. Returns false if it was ever seen before,
    /// including the root (never a key) and pages since forgotten.
    pub fn discover(&mut self, url: &str) -> bool {
        if !self.seen.insert(url.to_string()) {
            return false;
        }
        self.pages.insert(url.to_string(), PageRecord::default());
        true
    }

    pub fn record(&mut self, url: &str, record: PageRecord) {
        self.pages.insert(url.to_string(), record);
    }

    /// Drops the entry but keeps `url` seen, so it is never discovered again.
    pub fn forget(&mut self, url: &str) -> Option<PageRecord> {
        self.pages.remove(url)
    }

    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.pages.get(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn to_listing(&self) -> String {
        match to_listing(self) {
            Ok(listing) => listing,
            _ => String::new(),
        }
    }
}
