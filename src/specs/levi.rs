//! Levi's: jeans category pages → product pages.
//!
//! Listing: any `a[href]` whose href contains `/p/`.
//! Product:
//! - name `h1.product-title`, overview `div.product-overview`
//! - inside `div.product-spec-overview`, the `ul` that follows the
//!   `How it Fits` / `Composition & Care` labels
//! - image `picture.responsive-picture img.responsive-img[src]`, or
//!   `Image not found`; the only optional field
//! - price `span.price`

use scraper::Html;

use crate::config::consts::{IMAGE_NOT_FOUND, LEVI_BASE, LEVI_LISTINGS};
use crate::config::options::SiteKind;
use crate::core::html::{find_next, first, require, selector, stripped_text, text_of, with_text};
use crate::core::ScrapeError;
use crate::record::{Column, ProductRecord};

use super::{SiteSpec, CATALOG_COLUMNS};

const FIT_LABEL: &str = "How it Fits";
const CARE_LABEL: &str = "Composition & Care";

pub struct Levi {
    listings: Vec<String>,
}

impl Levi {
    pub fn new(listings: Vec<String>) -> Self {
        Self { listings }
    }
}

impl Default for Levi {
    fn default() -> Self {
        Self::new(LEVI_LISTINGS.iter().map(|u| s!(*u)).collect())
    }
}

impl SiteSpec for Levi {
    fn kind(&self) -> SiteKind { SiteKind::Levi }
    fn columns(&self) -> &'static [Column] { CATALOG_COLUMNS }
    fn base_url(&self) -> &str { LEVI_BASE }
    fn listing_urls(&self) -> Vec<String> { self.listings.clone() }

    fn parse_links(&self, html: &str) -> Result<Vec<String>, ScrapeError> {
        let doc = Html::parse_document(html);
        let anchors = selector("a[href]")?;
        Ok(doc
            .select(&anchors)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| href.contains("/p/"))
            .map(|href| s!(href.trim()))
            .collect())
    }

    fn extract(&self, url: &str, html: &str) -> Result<ProductRecord, ScrapeError> {
        let doc = Html::parse_document(html);
        let root = doc.root_element();

        let name = text_of(require(root, "h1.product-title", url)?);
        let overview = text_of(require(root, "div.product-overview", url)?);

        let specs = require(root, "div.product-spec-overview", url)?;
        let ul = selector("ul")?;
        let spec_list = |label: &str| -> Result<String, ScrapeError> {
            let span = with_text(specs, "span", label)?
                .ok_or_else(|| ScrapeError::missing(url, &format!("span \"{label}\"")))?;
            let list = find_next(root, span, &ul)
                .ok_or_else(|| ScrapeError::missing(url, &format!("ul after \"{label}\"")))?;
            Ok(text_of(list))
        };
        let fit = spec_list(FIT_LABEL)?;
        let composition = spec_list(CARE_LABEL)?;

        let image = first(root, "picture.responsive-picture img.responsive-img")?
            .and_then(|img| img.value().attr("src"))
            .map(|src| s!(src.trim()))
            .unwrap_or_else(|| s!(IMAGE_NOT_FOUND));

        let price = stripped_text(require(root, "span.price", url)?);

        Ok(ProductRecord {
            url: s!(url),
            name,
            overview,
            fit: vec![fit],
            composition: vec![composition],
            sizing: Vec::new(),
            images: vec![image],
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = include_str!("../../tests/fixtures/levi_listing.html");
    const PRODUCT: &str = include_str!("../../tests/fixtures/levi_product.html");
    const NO_IMAGE: &str = include_str!("../../tests/fixtures/levi_product_no_image.html");
    const URL: &str = "https://www.levi.com/US/en_US/clothing/men/jeans/501-original-fit-mens-jeans/p/005010101";

    #[test]
    fn listing_keeps_product_links_in_order() {
        let links = Levi::default().parse_links(LISTING).unwrap();
        assert_eq!(
            links,
            vec![
                "/US/en_US/clothing/men/jeans/501-original-fit-mens-jeans/p/005010101",
                "/US/en_US/clothing/men/jeans/511-slim-fit-mens-jeans/p/045115990",
                "https://www.levi.com/US/en_US/clothing/men/jeans/550-relaxed-fit-mens-jeans/p/005500004",
            ]
        );
    }

    #[test]
    fn product_fields() {
        let rec = Levi::default().extract(URL, PRODUCT).unwrap();
        assert_eq!(rec.url, URL);
        assert_eq!(rec.name, "501® Original Fit Men's Jeans");
        assert_eq!(rec.overview, "The original blue jean since 1873.");
        assert_eq!(rec.fit, vec!["Regular through the thigh"]);
        assert_eq!(rec.composition, vec!["100% Cotton"]);
        assert_eq!(
            rec.images,
            vec!["https://lsco.scene7.com/is/image/lsco/005010101-front-pdp.jpg"]
        );
        assert_eq!(rec.price, "$79.50");
    }

    #[test]
    fn missing_image_uses_sentinel() {
        let rec = Levi::default().extract(URL, NO_IMAGE).unwrap();
        assert_eq!(rec.images, vec![IMAGE_NOT_FOUND]);
        assert_eq!(rec.price, "$79.50");
    }

    #[test]
    fn img_without_src_uses_sentinel() {
        let html = PRODUCT.replace(
            r#"src="https://lsco.scene7.com/is/image/lsco/005010101-front-pdp.jpg" "#,
            "",
        );
        assert!(html.contains(r#"<img class="responsive-img" alt="#));
        let rec = Levi::default().extract(URL, &html).unwrap();
        assert_eq!(rec.images, vec![IMAGE_NOT_FOUND]);
    }

    #[test]
    fn missing_title_is_an_error() {
        let html = PRODUCT.replace("product-title", "product-heading");
        let err = Levi::default().extract(URL, &html).unwrap_err();
        assert!(matches!(err, ScrapeError::Missing { ref selector, .. } if selector == "h1.product-title"));
    }
}
