// src/progress.rs
/// Lightweight progress reporting used by long-running operations (scrape/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called when a site's product pass starts, with the number of links found.
    fn begin(&mut self, _site: &str, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one product page was scraped into a record.
    fn item_done(&mut self, _url: &str) {}

    /// Called when a listing or product page was skipped.
    fn item_skipped(&mut self, _url: &str, _reason: &str) {}

    /// Called at the end of a site, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints one status line per event to stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    site: String,
    done: usize,
    skipped: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, site: &str, total: usize) {
        self.site = s!(site);
        self.done = 0;
        self.skipped = 0;
        self.total = total;
        eprintln!("Fetching {} data: {} products", site, total);
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, url: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {}", self.done + self.skipped, self.total, url);
    }

    fn item_skipped(&mut self, url: &str, reason: &str) {
        self.skipped += 1;
        eprintln!("skipped {url}: {reason}");
    }

    fn finish(&mut self) {
        eprintln!(
            "{} complete ({} ok, {} skipped)",
            self.site, self.done, self.skipped
        );
    }
}
