//! ShopDuer: Shopify collection pages → product pages.
//!
//! Listing: `a.card__link` whose href contains `/products/`.
//! Product: every field is required; the accordion tabs are addressed by id.

use scraper::Html;

use crate::config::consts::{SHOPDUER_BASE, SHOPDUER_LISTINGS};
use crate::config::options::SiteKind;
use crate::core::html::{require, selector, stripped_text, text_of};
use crate::core::ScrapeError;
use crate::record::{Column, ProductRecord};

use super::{SiteSpec, CATALOG_COLUMNS};

const TITLE: &str = "h1.product__title";
const DESCRIPTION: &str = "div#accordion-pdp-tabs-1 div.product__description--pdp";
const FIT: &str = "div#accordion-pdp-tabs-2 div.accordion__content";
const FABRIC_AND_CARE: &str = "div#accordion--pdp-tabs-3--content";
const IMAGE: &str = "img.responsive-image__image";
const PRICE: &str = "span.price__original";

pub struct ShopDuer {
    listings: Vec<String>,
}

impl ShopDuer {
    pub fn new(listings: Vec<String>) -> Self {
        Self { listings }
    }
}

impl Default for ShopDuer {
    fn default() -> Self {
        Self::new(SHOPDUER_LISTINGS.iter().map(|u| s!(*u)).collect())
    }
}

impl SiteSpec for ShopDuer {
    fn kind(&self) -> SiteKind { SiteKind::ShopDuer }
    fn columns(&self) -> &'static [Column] { CATALOG_COLUMNS }
    fn base_url(&self) -> &str { SHOPDUER_BASE }
    fn listing_urls(&self) -> Vec<String> { self.listings.clone() }

    fn parse_links(&self, html: &str) -> Result<Vec<String>, ScrapeError> {
        let doc = Html::parse_document(html);
        let cards = selector("a.card__link")?;
        Ok(doc
            .select(&cards)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| href.contains("/products/"))
            .map(|href| s!(href.trim()))
            .collect())
    }

    fn extract(&self, url: &str, html: &str) -> Result<ProductRecord, ScrapeError> {
        let doc = Html::parse_document(html);
        let root = doc.root_element();

        let name = text_of(require(root, TITLE, url)?);
        let overview = text_of(require(root, DESCRIPTION, url)?);
        let fit = text_of(require(root, FIT, url)?);
        let care = text_of(require(root, FABRIC_AND_CARE, url)?);

        let image = require(root, IMAGE, url)?
            .value()
            .attr("src")
            .map(|src| s!(src.trim()))
            .ok_or_else(|| ScrapeError::missing(url, &join!(IMAGE, "[src]")))?;

        let price = stripped_text(require(root, PRICE, url)?);

        Ok(ProductRecord {
            url: s!(url),
            name,
            overview,
            fit: vec![fit],
            composition: vec![care],
            sizing: Vec::new(),
            images: vec![image],
            price,
        })
    }
}
