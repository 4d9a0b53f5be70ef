// src/core/html.rs
// Small query helpers over `scraper` so the specs read like their selectors.

use scraper::{ElementRef, Selector};

use super::ScrapeError;
use super::sanitize::normalize_ws;

pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(s!(css)))
}

/// All text under `el`, trimmed at the ends.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Every text node trimmed on its own, then glued with nothing in between.
/// `<span> $ 98 <sup>.00</sup></span>` → `$ 98.00`
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

pub fn first<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).next())
}

/// First match or `ScrapeError::Missing` naming `css` and `url`.
pub fn require<'a>(scope: ElementRef<'a>, css: &str, url: &str) -> Result<ElementRef<'a>, ScrapeError> {
    first(scope, css)?.ok_or_else(|| ScrapeError::missing(url, css))
}

/// Trimmed text of every match, empty ones dropped.
pub fn texts(scope: ElementRef<'_>, css: &str) -> Result<Vec<String>, ScrapeError> {
    let sel = selector(css)?;
    Ok(scope
        .select(&sel)
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect())
}

/// First element under `scope` whose whitespace-normalized text equals `label`.
pub fn with_text<'a>(
    scope: ElementRef<'a>,
    css: &str,
    label: &str,
) -> Result<Option<ElementRef<'a>>, ScrapeError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).find(|el| normalize_ws(&text_of(*el)) == label))
}

/// First element matching `sel` that comes after `anchor` in document order,
/// searching everything under `root` (the anchor's own children included).
pub fn find_next<'a>(root: ElementRef<'a>, anchor: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    let anchor_id = (*anchor).id();
    root.descendants()
        .skip_while(|node| node.id() != anchor_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| sel.matches(el))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn stripped_text_glues_pieces() {
        let doc = Html::parse_fragment(r#"<span class="price"> $ 98 <sup> .00 </sup></span>"#);
        let el = require(doc.root_element(), "span.price", "u").unwrap();
        assert_eq!(stripped_text(el), "$ 98.00");
        assert_eq!(text_of(el), "$ 98  .00");
    }

    #[test]
    fn require_names_the_selector() {
        let doc = Html::parse_fragment("<div></div>");
        let err = require(doc.root_element(), "h1.title", "https://x.test/p").unwrap_err();
        assert_eq!(err.to_string(), "missing `h1.title` on https://x.test/p");
    }

    #[test]
    fn find_next_walks_document_order() {
        let doc = Html::parse_document(
            r#"<div><p><span>How it Fits</span></p><ul><li>Slim</li></ul><ul><li>Other</li></ul></div>"#,
        );
        let root = doc.root_element();
        let span = with_text(root, "span", "How it Fits").unwrap().unwrap();
        let ul = find_next(root, span, &selector("ul").unwrap()).unwrap();
        assert_eq!(text_of(ul), "Slim");
    }

    #[test]
    fn bad_selector_is_an_error() {
        assert!(matches!(selector("div[["), Err(ScrapeError::Selector(_))));
    }
}
