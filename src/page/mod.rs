mod extract;
mod fetcher;

pub use extract::read_page;
pub use fetcher::{FetchError, Fetched, PageFetcher};
