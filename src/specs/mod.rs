//! # Site scraping specs
//!
//! One module per shop. Each spec encodes *where the ground truth lives in the
//! HTML* of that shop's listing and product pages, behind the shared
//! [`SiteSpec`] trait:
//!
//! - `parse_links`: pure; listing HTML → product hrefs, in document order.
//! - `collect_links`: fetches the configured listing pages and resolves hrefs.
//!   The default walks a fixed URL list; G-Star overrides it to paginate.
//! - `extract`: pure; product HTML → [`ProductRecord`], or a [`ScrapeError`]
//!   naming the selector that missed.
//!
//! ## What does **not** live here
//! - Sequencing, skip bookkeeping and progress: `scrape::collect_site`.
//! - Deduplication and file output: `store` and `file`.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect_all → specs::<site>::collect_links → Fetch::get
//!                           ↘ Fetch::get → specs::<site>::extract
//!       file::export (dedup + sheets)
//! ```
//!
//! Specs are tested offline against the saved pages in `tests/fixtures/`.

use url::Url;

use crate::config::options::{ScrapeOptions, SiteKind};
use crate::core::net::{absolute_url, Fetch};
use crate::core::ScrapeError;
use crate::progress::Progress;
use crate::record::{Column, Field, ProductRecord};
use crate::store::Skipped;

pub mod gstar;
pub mod levi;
pub mod shopduer;

pub use gstar::GStar;
pub use levi::Levi;
pub use shopduer::ShopDuer;

/// Sheet layout shared by Levi and ShopDuer.
pub const CATALOG_COLUMNS: &[Column] = &[
    ("Product Url", Field::Url),
    ("Product Name", Field::Name),
    ("Product Overview", Field::Overview),
    ("How it Fits", Field::Fit),
    ("Composition & Care", Field::Composition),
    ("Image URL", Field::Images),
    ("Price", Field::Price),
];

/// Links gathered from a site's listing pages, plus the listing pages that failed.
#[derive(Debug, Default)]
pub struct Harvest {
    pub links: Vec<String>,
    pub skipped: Vec<Skipped>,
}

pub trait SiteSpec {
    fn kind(&self) -> SiteKind;

    /// Sheet header + field order.
    fn columns(&self) -> &'static [Column];

    /// Scheme + host that relative hrefs resolve against.
    fn base_url(&self) -> &str;

    /// Listing pages walked by the default `collect_links`.
    fn listing_urls(&self) -> Vec<String>;

    /// Product hrefs on one listing page, as written in the HTML.
    fn parse_links(&self, html: &str) -> Result<Vec<String>, ScrapeError>;

    /// Product page → record.
    fn extract(&self, url: &str, html: &str) -> Result<ProductRecord, ScrapeError>;

    /// Fetch every listing page and gather absolute product links, in order.
    /// A failed listing page is recorded and the rest still run.
    fn collect_links(&self, fetch: &dyn Fetch, progress: &mut dyn Progress) -> Harvest {
        let mut harvest = Harvest::default();

        for listing in self.listing_urls() {
            let found = fetch.get(&listing).and_then(|html| self.parse_links(&html));
            match found {
                Ok(hrefs) => {
                    logf!("{}: {} product links on {}", self.kind(), hrefs.len(), listing);
                    harvest.links.extend(self.absolutize(hrefs));
                }
                Err(e) => {
                    skip_listing(&mut harvest, &listing, &e, progress);
                }
            }
        }
        harvest
    }

    fn absolutize(&self, hrefs: Vec<String>) -> Vec<String> {
        match Url::parse(self.base_url()) {
            Ok(base) => hrefs.iter().map(|h| absolute_url(&base, h)).collect(),
            Err(_) => hrefs,
        }
    }
}

pub(crate) fn skip_listing(
    harvest: &mut Harvest,
    url: &str,
    err: &ScrapeError,
    progress: &mut dyn Progress,
) {
    let reason = err.to_string();
    loge!("listing {url}: {reason}");
    progress.item_skipped(url, &reason);
    harvest.skipped.push(Skipped { url: s!(url), reason });
}

/// Spec for `kind`, configured from the built-in listing URLs and `opts`.
pub fn for_site(kind: SiteKind, opts: &ScrapeOptions) -> Box<dyn SiteSpec> {
    match kind {
        SiteKind::Levi => Box::new(Levi::default()),
        SiteKind::ShopDuer => Box::new(ShopDuer::default()),
        SiteKind::GStar => Box::new(GStar::default().with_page_limit(opts.gstar_page_limit)),
    }
}
