//! G-Star: paginated jeans listings → product pages.
//!
//! Listing pages come from a `{}` page-number template. The walk follows
//! `a.link--next` until a page has no product links or no next link.
//! `page_limit` caps the number of pages per template.
//!
//! Product fields sit behind `data-testid` attributes. Name and description
//! degrade to empty strings and the bullet lists to empty lists; only the price
//! is required.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::config::consts::{
    GSTAR_BASE, GSTAR_EXCLUDED, GSTAR_IMAGE_EXT, GSTAR_PAGE_LIMIT, GSTAR_PRODUCT_PATH, GSTAR_TEMPLATES,
};
use crate::config::options::SiteKind;
use crate::core::html::{first, require, selector, stripped_text, text_of, texts};
use crate::core::net::Fetch;
use crate::core::sanitize::split_srcset;
use crate::core::ScrapeError;
use crate::progress::Progress;
use crate::record::{Column, Field, ProductRecord};

use super::{skip_listing, Harvest, SiteSpec};

pub const GSTAR_COLUMNS: &[Column] = &[
    ("Product URL", Field::Url),
    ("Product Name", Field::Name),
    ("Product Description", Field::Overview),
    ("Product Features", Field::Fit),
    ("Product Materials", Field::Composition),
    ("Sizing", Field::Sizing),
    ("Image URL", Field::Images),
    ("Price", Field::Price),
];

const NAME: &str = r#"div[data-testid="summary-product-name"] h1"#;
const DESCRIPTION: &str = r#"div[data-testid="exploding-view-description"]"#;
const FEATURES: &str = r#"ul[data-testid="features-bullets"] p"#;
const MATERIALS: &str = r#"ul[data-testid="fabrics-bullets"] li"#;
const SIZING: &str =
    r#"ul[data-testid="features-dimensions-bullets"] p[data-testid="features-dimensions-bullets-item"]"#;
const PRICE: &str = r#"strong[data-testid="summary-product-price"]"#;
const NEXT: &str = "a.link--next[href]";

static PRODUCT_PATH: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(GSTAR_PRODUCT_PATH).ok());

/// One listing page: hrefs matching the product path and the raw "next" href.
/// Excluded paths are still in `links`; they are dropped after the walk.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListingPage {
    pub links: Vec<String>,
    pub next: Option<String>,
}

pub struct GStar {
    templates: Vec<String>,
    page_limit: usize,
}

impl GStar {
    /// `templates` carry a `{}` where the page number goes.
    pub fn new(templates: Vec<String>) -> Self {
        Self { templates, page_limit: GSTAR_PAGE_LIMIT }
    }

    pub fn with_page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn page_url(template: &str, page: usize) -> String {
        template.replacen("{}", &page.to_string(), 1)
    }

    pub fn parse_page(&self, html: &str) -> Result<ListingPage, ScrapeError> {
        let product_path = PRODUCT_PATH
            .as_ref()
            .ok_or_else(|| ScrapeError::Selector(s!(GSTAR_PRODUCT_PATH)))?;

        let doc = Html::parse_document(html);
        let anchors = selector("a[href]")?;
        let links = doc
            .select(&anchors)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| product_path.is_match(href))
            .map(|href| s!(href))
            .collect();

        let next = first(doc.root_element(), NEXT)?
            .and_then(|a| a.value().attr("href"))
            .map(|href| s!(href.trim()));

        Ok(ListingPage { links, next })
    }

    /// Walk one template from page 1 along the "next" links.
    fn walk(
        &self,
        template: &str,
        fetch: &dyn Fetch,
        harvest: &mut Harvest,
        progress: &mut dyn Progress,
    ) {
        let mut cursor = Some(Self::page_url(template, 1));
        let mut pages = 0usize;

        while let Some(url) = cursor.take() {
            if pages >= self.page_limit {
                logd!("G-Star: page ceiling {} reached before {url}", self.page_limit);
                break;
            }
            pages += 1;

            let page = match fetch.get(&url).and_then(|html| self.parse_page(&html)) {
                Ok(p) => p,
                Err(e) => {
                    skip_listing(harvest, &url, &e, progress);
                    break;
                }
            };

            if page.links.is_empty() {
                logf!("G-Star: no products on {url}; stopping");
                break;
            }
            logf!("G-Star: {} product links on {url}", page.links.len());
            harvest.links.extend(self.absolutize(page.links));

            cursor = page.next.and_then(|href| self.absolutize(vec![href]).pop());
        }
    }
}

impl Default for GStar {
    fn default() -> Self {
        Self::new(GSTAR_TEMPLATES.iter().map(|u| s!(*u)).collect())
    }
}

impl SiteSpec for GStar {
    fn kind(&self) -> SiteKind { SiteKind::GStar }
    fn columns(&self) -> &'static [Column] { GSTAR_COLUMNS }
    fn base_url(&self) -> &str { GSTAR_BASE }

    /// First page of each template; the rest is discovered while walking.
    fn listing_urls(&self) -> Vec<String> {
        self.templates.iter().map(|t| Self::page_url(t, 1)).collect()
    }

    fn parse_links(&self, html: &str) -> Result<Vec<String>, ScrapeError> {
        let mut links = self.parse_page(html)?.links;
        links.retain(|href| !GSTAR_EXCLUDED.contains(&href.as_str()));
        Ok(links)
    }

    fn collect_links(&self, fetch: &dyn Fetch, progress: &mut dyn Progress) -> Harvest {
        let mut harvest = Harvest::default();
        for template in &self.templates {
            self.walk(template, fetch, &mut harvest, progress);
        }

        let excluded = self.absolutize(GSTAR_EXCLUDED.iter().map(|p| s!(*p)).collect());
        let before = harvest.links.len();
        harvest.links.retain(|link| !excluded.contains(link));
        if harvest.links.len() < before {
            logd!("G-Star: dropped {} excluded links", before - harvest.links.len());
        }
        harvest
    }

    fn extract(&self, url: &str, html: &str) -> Result<ProductRecord, ScrapeError> {
        let doc = Html::parse_document(html);
        let root = doc.root_element();

        let name = first(root, NAME)?.map(text_of).unwrap_or_default();
        let overview = first(root, DESCRIPTION)?.map(text_of).unwrap_or_default();

        let images = first(root, "source[srcset]")?
            .and_then(|src| src.value().attr("srcset"))
            .map(|set| split_srcset(set, GSTAR_IMAGE_EXT))
            .unwrap_or_default();

        let price = stripped_text(require(root, PRICE, url)?);

        Ok(ProductRecord {
            url: s!(url),
            name,
            overview,
            fit: texts(root, FEATURES)?,
            composition: texts(root, MATERIALS)?,
            sizing: texts(root, SIZING)?,
            images,
            price,
        })
    }
}
