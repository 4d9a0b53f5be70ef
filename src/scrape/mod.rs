// src/scrape/mod.rs
mod scrape;

pub use scrape::collect_all;
pub use scrape::collect_site;
pub use scrape::SiteRun;
