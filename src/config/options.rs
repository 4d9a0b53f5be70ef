// src/config/options.rs
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiteKind {
    Levi,
    ShopDuer,
    GStar,
}

impl SiteKind {
    pub const ALL: [SiteKind; 3] = [SiteKind::Levi, SiteKind::ShopDuer, SiteKind::GStar];

    pub fn label(&self) -> &'static str {
        match self {
            SiteKind::Levi => "Levi",
            SiteKind::ShopDuer => "ShopDuer",
            SiteKind::GStar => "G-Star",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            SiteKind::Levi => SHEET_LEVI,
            SiteKind::ShopDuer => SHEET_SHOPDUER,
            SiteKind::GStar => SHEET_GSTAR,
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SiteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "levi" | "levis" => Ok(SiteKind::Levi),
            "shopduer" | "duer" => Ok(SiteKind::ShopDuer),
            "gstar" | "g-star" => Ok(SiteKind::GStar),
            other => Err(format!("Unknown site: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Sites to scrape, in run order
    pub sites: Vec<SiteKind>,
    pub gstar_page_limit: usize,
    pub pause_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            sites: SiteKind::ALL.to_vec(),
            gstar_page_limit: GSTAR_PAGE_LIMIT,
            pause_ms: REQUEST_PAUSE_MS,
            timeout_secs: REQUEST_TIMEOUT_SECS,
            user_agent: s!(USER_AGENT),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }

    /// Field delimiter for the delimited formats; `None` for the workbook.
    pub fn delim(&self) -> Option<u8> {
        match self {
            ExportFormat::Xlsx => None,
            ExportFormat::Csv => Some(b','),
            ExportFormat::Tsv => Some(b'\t'),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(format!("Unknown format: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    /// G-Star rows are kept raw unless asked
    pub dedup_gstar: bool,
    /// Add a sheet/file listing skipped URLs and reasons
    pub report_skipped: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Xlsx,
            out_path: OutputPath::default(),
            dedup_gstar: false,
            report_skipped: false,
        }
    }
}

impl ExportOptions {
    /// Workbook: `<dir>/<stem>.xlsx`. Delimited: the directory that receives one file per sheet.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();

        match self.format {
            ExportFormat::Xlsx => {
                match &self.out_path.file_name {
                    Some(name) => path.push(name),
                    None => {
                        let stem = self.out_path.file_stem.to_string_lossy();
                        path.push(join!(stem, ".", self.format.ext()));
                    }
                }
            }
            ExportFormat::Csv | ExportFormat::Tsv => { /* directory only */ }
        }
        path
    }

    /// Parse user text into dir + file name. A workbook path keeps whatever
    /// extension the user typed; a delimited export takes the text as a directory.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();

        match self.format {
            ExportFormat::Xlsx => {
                let p = Path::new(s);
                if let Some(parent) = p.parent() {
                    self.out_path.dir = parent.to_path_buf();
                }
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_os_string();
                }
                self.out_path.file_name = match p.extension() {
                    Some(_) => p.file_name().map(|n| n.to_os_string()),
                    None => None,
                };
            }
            ExportFormat::Csv | ExportFormat::Tsv => {
                self.out_path.dir = PathBuf::from(s);
                self.out_path.file_name = None;
            }
        }
    }

    /// Path of the delimited file for one sheet.
    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.out_path.dir.join(join!(sheet, ".", self.format.ext()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    /// Full name when the user typed one with an extension
    file_name: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            file_name: None,
        }
    }
}
