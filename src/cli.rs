// src/cli.rs
use std::{collections::HashSet, path::{Path, PathBuf}};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::consts::{GSTAR_PAGE_LIMIT, LOG_FILE, REQUEST_PAUSE_MS, REQUEST_TIMEOUT_SECS, STORE_DIR, USER_AGENT};
use crate::config::options::{AppOptions, ExportFormat, SiteKind};
use crate::core::net::{Fetch, HttpFetch};
use crate::file::ExportReport;
use crate::progress::{ConsoleProgress, Progress};
use crate::{file, log, scrape};

/// Scrape jeans catalogs from Levi's, ShopDuer and G-Star into a workbook.
#[derive(Parser, Debug)]
#[command(name = "product_scrape")]
#[command(version)]
pub struct Cli {
    /// Workbook path, or output directory for csv/tsv [default: out/product_details.xlsx]
    #[arg(short, long)]
    pub out: Option<String>,

    /// xlsx | csv | tsv
    #[arg(short, long, default_value = "xlsx")]
    pub format: ExportFormat,

    /// Comma-separated sites: levi, shopduer, gstar [default: all]
    #[arg(short, long = "site", value_delimiter = ',')]
    pub sites: Vec<SiteKind>,

    /// Most listing pages walked per G-Star category
    #[arg(long, default_value_t = GSTAR_PAGE_LIMIT)]
    pub gstar_pages: usize,

    /// Drop repeated product URLs from the G-Star sheet too
    #[arg(long)]
    pub dedup_gstar: bool,

    /// Add a Skipped sheet (or file) listing failed URLs and why
    #[arg(long)]
    pub report_skipped: bool,

    /// Pause between requests, in milliseconds
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub pause_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    #[arg(long, default_value = USER_AGENT)]
    pub user_agent: String,

    /// Log file [default: .store/debug.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| Path::new(STORE_DIR).join(LOG_FILE))
    }

    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        if !self.sites.is_empty() {
            let mut seen = HashSet::new();
            opts.scrape.sites = self.sites.iter().copied().filter(|k| seen.insert(*k)).collect();
        }
        opts.scrape.gstar_page_limit = self.gstar_pages;
        opts.scrape.pause_ms = self.pause_ms;
        opts.scrape.timeout_secs = self.timeout;
        opts.scrape.user_agent = self.user_agent.clone();

        // format first: it decides how the path is read
        opts.export.format = self.format;
        if let Some(out) = &self.out {
            opts.export.set_path(out);
        }
        opts.export.dedup_gstar = self.dedup_gstar;
        opts.export.report_skipped = self.report_skipped;
        opts
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_path = cli.log_path();
    log::init(&log_path).wrap_err_with(|| format!("cannot log to {}", log_path.display()))?;

    let opts = cli.to_options();
    logf!("run start: sites={:?} format={:?} out={}", opts.scrape.sites, opts.export.format, opts.export.out_path().display());

    let fetch = HttpFetch::new(&opts.scrape).wrap_err("cannot build the HTTP client")?;
    let mut progress = ConsoleProgress::default();
    let report = scrape_and_export(&opts, &fetch, &mut progress)?;

    for path in &report.written {
        println!("Wrote {}", path.display());
    }
    for site in &report.sites {
        println!("{site}");
    }
    logf!("run done");
    Ok(())
}

/// Scrape every selected site, then write the sheets.
pub fn scrape_and_export(
    opts: &AppOptions,
    fetch: &dyn Fetch,
    progress: &mut dyn Progress,
) -> Result<ExportReport> {
    let runs = scrape::collect_all(&opts.scrape, fetch, progress);
    file::export(&opts.export, &runs)
        .wrap_err_with(|| format!("export to {} failed", opts.export.out_path().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::MapFetch;
    use crate::core::ExportError;
    use crate::progress::NullProgress;

    #[test]
    fn no_flags_means_defaults() {
        let cli = Cli::try_parse_from(["product_scrape"]).unwrap();
        assert_eq!(cli.to_options(), AppOptions::default());
        assert_eq!(cli.log_path(), PathBuf::from(".store").join("debug.log"));
    }

    #[test]
    fn flags_reach_the_options() {
        let cli = Cli::try_parse_from([
            "product_scrape",
            "--format", "csv",
            "--out", "dump",
            "--site", "gstar,levi",
            "--gstar-pages", "2",
            "--dedup-gstar",
            "--report-skipped",
            "--pause-ms", "0",
        ])
        .unwrap();
        let opts = cli.to_options();

        assert_eq!(opts.scrape.sites, vec![SiteKind::GStar, SiteKind::Levi]);
        assert_eq!(opts.scrape.gstar_page_limit, 2);
        assert_eq!(opts.scrape.pause_ms, 0);
        assert_eq!(opts.export.format, ExportFormat::Csv);
        assert_eq!(opts.export.out_path(), PathBuf::from("dump"));
        assert!(opts.export.dedup_gstar);
        assert!(opts.export.report_skipped);
    }

    #[test]
    fn repeated_sites_run_once() {
        let cli = Cli::try_parse_from(["product_scrape", "--site", "levi,gstar,levi", "-s", "gstar"]).unwrap();
        assert_eq!(cli.to_options().scrape.sites, vec![SiteKind::Levi, SiteKind::GStar]);
    }

    #[test]
    fn export_failure_keeps_its_cause() {
        let dir = std::env::temp_dir().join("product_scrape_cli_blocked");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("taken");
        std::fs::write(&blocker, "x").unwrap();

        let cli = Cli::try_parse_from([
            "product_scrape", "--site", "levi", "--format", "csv", "--out", blocker.to_str().unwrap(),
        ])
        .unwrap();
        let err = scrape_and_export(&cli.to_options(), &MapFetch::new(), &mut NullProgress).unwrap_err();

        assert!(err.to_string().starts_with("export to"));
        assert!(err.chain().any(|cause| matches!(
            cause.downcast_ref::<ExportError>(),
            Some(ExportError::NotADirectory(path)) if *path == blocker
        )));
    }

    #[test]
    fn unknown_site_is_rejected() {
        assert!(Cli::try_parse_from(["product_scrape", "--site", "zara"]).is_err());
    }
}
