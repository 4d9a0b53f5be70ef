// src/file.rs

use std::{
    fmt,
    fs,
    path::{Path, PathBuf},
};

use rust_xlsxwriter::{Format, Workbook};

use crate::config::consts::{SHEET_SKIPPED, XLSX_CELL_MAX};
use crate::config::options::{ExportOptions, SiteKind};
use crate::core::sanitize::sanitize_sheet_name;
use crate::core::ExportError;
use crate::scrape::SiteRun;
use crate::specs;
use crate::store::{dedup_by_url, skipped_dataset, DataSet};

/// One output sheet (workbook tab or delimited file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub data: DataSet,
}

/// Per-site counts for the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteSummary {
    pub kind: SiteKind,
    pub kept: usize,
    pub dropped: usize,
    pub skipped: usize,
}

impl fmt::Display for SiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} rows ({} duplicates dropped, {} skipped)",
            self.kind, self.kept, self.dropped, self.skipped
        )
    }
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub sites: Vec<SiteSummary>,
}

/// Turn site runs into sheets, in run order. Levi and ShopDuer are always
/// deduplicated by URL; G-Star only with `dedup_gstar`. The skipped sheet is
/// appended last when `report_skipped` is set.
pub fn build_sheets(export: &ExportOptions, runs: &[SiteRun]) -> (Vec<Sheet>, Vec<SiteSummary>) {
    let mut sheets = Vec::with_capacity(runs.len() + 1);
    let mut summary = Vec::with_capacity(runs.len());

    for run in runs {
        let mut records = run.records.clone();
        let dedup = match run.kind {
            SiteKind::Levi | SiteKind::ShopDuer => true,
            SiteKind::GStar => export.dedup_gstar,
        };
        let dropped = if dedup { dedup_by_url(&mut records) } else { 0 };
        if dropped > 0 {
            logf!("{}: dropped {} duplicate rows", run.kind, dropped);
        }

        let columns = match run.kind {
            SiteKind::GStar => specs::gstar::GSTAR_COLUMNS,
            SiteKind::Levi | SiteKind::ShopDuer => specs::CATALOG_COLUMNS,
        };
        let data = DataSet::from_records(columns, &records);
        if data.is_empty() {
            logw!("{}: no rows to write", run.kind);
        }
        sheets.push(Sheet { name: sanitize_sheet_name(run.kind.sheet_name()), data });
        summary.push(SiteSummary {
            kind: run.kind,
            kept: records.len(),
            dropped,
            skipped: run.skipped.len(),
        });
    }

    if export.report_skipped {
        let entries = runs
            .iter()
            .flat_map(|run| run.skipped.iter().map(move |sk| (run.kind.label(), sk)));
        sheets.push(Sheet { name: s!(SHEET_SKIPPED), data: skipped_dataset(entries) });
    }

    (sheets, summary)
}

/// Build the sheets and write them in the configured format.
pub fn export(export: &ExportOptions, runs: &[SiteRun]) -> Result<ExportReport, ExportError> {
    let (sheets, sites) = build_sheets(export, runs);

    let written = match export.format.delim() {
        None => vec![write_workbook(&export.out_path(), &sheets)?],
        Some(delim) => write_delimited(export, &sheets, delim)?,
    };

    for path in &written {
        logf!("wrote {}", path.display());
    }
    Ok(ExportReport { written, sites })
}

/// One workbook, one worksheet per sheet. Overwrites `path`.
pub fn write_workbook(path: &Path, sheets: &[Sheet]) -> Result<PathBuf, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let wrap = Format::new().set_text_wrap();

    for sheet in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(&sheet.name)?;

        let mut row: u32 = 0;
        if let Some(headers) = &sheet.data.headers {
            for (col, h) in headers.iter().enumerate() {
                ws.write_string_with_format(row, col as u16, h, &bold)?;
            }
            row += 1;
        }
        for cells in &sheet.data.rows {
            for (col, full) in cells.iter().enumerate() {
                let cell = fit_cell(full);
                if cell.len() < full.len() {
                    logw!("{}: cell {}:{} cut to {} chars", sheet.name, row, col, XLSX_CELL_MAX);
                }
                if cell.contains('\n') {
                    ws.write_string_with_format(row, col as u16, cell, &wrap)?;
                } else {
                    ws.write_string(row, col as u16, cell)?;
                }
            }
            row += 1;
        }
    }

    workbook.save(path)?;
    Ok(path.to_path_buf())
}

/// One file per sheet in the export directory, named after the sheet.
pub fn write_delimited(
    export: &ExportOptions,
    sheets: &[Sheet],
    delim: u8,
) -> Result<Vec<PathBuf>, ExportError> {
    ensure_directory(&export.out_path())?;

    let mut written = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        let path = export.sheet_path(&sheet.name);
        let mut wtr = csv::WriterBuilder::new().delimiter(delim).from_path(&path)?;

        if let Some(headers) = &sheet.data.headers {
            wtr.write_record(headers)?;
        }
        for row in &sheet.data.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        written.push(path);
    }
    Ok(written)
}

/// Cut a cell to what a worksheet accepts.
fn fit_cell(cell: &str) -> &str {
    match cell.char_indices().nth(XLSX_CELL_MAX) {
        Some((end, _)) => &cell[..end],
        None => cell,
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
