// src/scrape/scrape.rs
// Sequential driver: listing links first, then one product page at a time.

use crate::{
    config::options::{ScrapeOptions, SiteKind},
    core::net::Fetch,
    progress::Progress,
    record::ProductRecord,
    specs::{self, Harvest, SiteSpec},
    store::Skipped,
};

/// Everything one site produced in a run. Records are in link order, raw
/// (duplicates included); `skipped` lists listing pages first, then products.
#[derive(Debug)]
pub struct SiteRun {
    pub kind: SiteKind,
    pub records: Vec<ProductRecord>,
    pub skipped: Vec<Skipped>,
}

/// Collect links for one site, then scrape every product page.
/// A page that fails to fetch or extract becomes a `Skipped` entry; nothing here aborts.
pub fn collect_site(
    spec: &dyn SiteSpec,
    fetch: &dyn Fetch,
    progress: &mut dyn Progress,
) -> SiteRun {
    let kind = spec.kind();
    progress.log(&format!("Collecting {kind} product links..."));

    let Harvest { links, mut skipped } = spec.collect_links(fetch, progress);
    logf!("{kind}: {} product links", links.len());

    progress.begin(kind.label(), links.len());

    let mut records = Vec::with_capacity(links.len());
    for url in &links {
        match fetch.get(url).and_then(|html| spec.extract(url, &html)) {
            Ok(rec) => {
                records.push(rec);
                progress.item_done(url);
            }
            Err(e) => {
                let reason = e.to_string();
                loge!("{kind}: skipping {url}: {reason}");
                progress.item_skipped(url, &reason);
                skipped.push(Skipped { url: url.clone(), reason });
            }
        }
    }

    logf!("{kind}: {} records, {} skipped", records.len(), skipped.len());
    progress.finish();

    SiteRun { kind, records, skipped }
}

/// Run every selected site in order over one fetcher.
pub fn collect_all(
    opts: &ScrapeOptions,
    fetch: &dyn Fetch,
    progress: &mut dyn Progress,
) -> Vec<SiteRun> {
    let mut runs = Vec::with_capacity(opts.sites.len());
    for &kind in &opts.sites {
        let spec = specs::for_site(kind, opts);
        runs.push(collect_site(spec.as_ref(), fetch, progress));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::MapFetch;
    use crate::progress::NullProgress;
    use crate::specs::Levi;

    const PRODUCT: &str = include_str!("../../tests/fixtures/levi_product.html");

    #[derive(Default)]
    struct Tally {
        begun: Option<(String, usize)>,
        done: usize,
        skipped: usize,
        finished: bool,
    }

    impl Progress for Tally {
        fn begin(&mut self, site: &str, total: usize) { self.begun = Some((s!(site), total)); }
        fn item_done(&mut self, _url: &str) { self.done += 1; }
        fn item_skipped(&mut self, _url: &str, _reason: &str) { self.skipped += 1; }
        fn finish(&mut self) { self.finished = true; }
    }

    fn listing(hrefs: &[&str]) -> String {
        let anchors: String = hrefs.iter().map(|h| format!(r#"<a href="{h}">x</a>"#)).collect();
        format!("<html><body>{anchors}</body></html>")
    }

    #[test]
    fn bad_product_is_skipped_not_fatal() {
        let fetch = MapFetch::new()
            .with("https://l.test/jeans", &listing(&["/p/1", "/p/2"]))
            .with("https://www.levi.com/p/1", PRODUCT)
            .with("https://www.levi.com/p/2", "<html><body>gone</body></html>");
        let spec = Levi::new(vec![s!("https://l.test/jeans")]);

        let mut tally = Tally::default();
        let run = collect_site(&spec, &fetch, &mut tally);

        assert_eq!(run.kind, SiteKind::Levi);
        assert_eq!(run.records.len(), 1);
        assert_eq!(run.records[0].url, "https://www.levi.com/p/1");
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].url, "https://www.levi.com/p/2");
        assert!(run.skipped[0].reason.contains("h1.product-title"));

        assert_eq!(tally.begun, Some((s!("Levi"), 2)));
        assert_eq!((tally.done, tally.skipped), (1, 1));
        assert!(tally.finished);
    }

    #[test]
    fn failed_listing_lands_in_skipped() {
        let fetch = MapFetch::new().with("https://l.test/men", &listing(&["/p/1"]));
        let spec = Levi::new(vec![s!("https://l.test/men"), s!("https://l.test/women")]);

        let run = collect_site(&spec, &fetch, &mut NullProgress);

        // /p/1 itself is not mapped either
        assert!(run.records.is_empty());
        assert_eq!(run.skipped.len(), 2);
        assert_eq!(run.skipped[0].url, "https://l.test/women");
        assert_eq!(run.skipped[0].reason, "HTTP 404 from https://l.test/women");
    }

    #[test]
    fn duplicate_links_are_scraped_twice() {
        let fetch = MapFetch::new()
            .with("https://l.test/jeans", &listing(&["/p/1", "/p/1"]))
            .with("https://www.levi.com/p/1", PRODUCT);
        let spec = Levi::new(vec![s!("https://l.test/jeans")]);

        let run = collect_site(&spec, &fetch, &mut NullProgress);
        assert_eq!(run.records.len(), 2);
        assert_eq!(fetch.hits(), 3);
    }
}
