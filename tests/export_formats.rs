// tests/export_formats.rs
//
// Writing sheets to disk: workbook, csv, tsv, and the output path rules.
//
use std::fs;
use std::path::PathBuf;

use product_scrape::config::options::{ExportFormat, ExportOptions, SiteKind};
use product_scrape::core::ExportError;
use product_scrape::file;
use product_scrape::record::ProductRecord;
use product_scrape::scrape::SiteRun;
use product_scrape::store::Skipped;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("product_scrape_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn levi_run() -> SiteRun {
    let rec = |url: &str, name: &str| ProductRecord {
        url: url.to_string(),
        name: name.to_string(),
        overview: "The original blue jean since 1873.".to_string(),
        fit: vec!["Regular through the thigh".to_string()],
        composition: vec!["100% Cotton".to_string()],
        sizing: Vec::new(),
        images: vec!["Image not found".to_string()],
        price: "$79.50".to_string(),
    };
    SiteRun {
        kind: SiteKind::Levi,
        records: vec![
            rec("https://www.levi.com/p/1", "501® Original Fit"),
            rec("https://www.levi.com/p/2", "511™ Slim, Stretch"),
            rec("https://www.levi.com/p/1", "501® Original Fit"),
        ],
        skipped: vec![Skipped {
            url: "https://www.levi.com/p/3".to_string(),
            reason: "HTTP 503 from https://www.levi.com/p/3".to_string(),
        }],
    }
}

fn gstar_run() -> SiteRun {
    SiteRun {
        kind: SiteKind::GStar,
        records: vec![ProductRecord {
            url: "https://www.g-star.com/en_us/shop/women/jeans/lhana-skinny-jeans".to_string(),
            name: "Lhana Skinny Jeans".to_string(),
            fit: vec!["Skinny fit".to_string(), "High waist".to_string()],
            sizing: vec![r#"Inseam: 30""#.to_string()],
            price: "$120".to_string(),
            ..Default::default()
        }],
        skipped: Vec::new(),
    }
}

#[test]
fn workbook_lands_at_the_chosen_path() {
    let dir = tmp_dir("xlsx");
    let target = dir.join("nested").join("jeans.xlsx");

    let mut export = ExportOptions::default();
    export.set_path(target.to_str().unwrap());

    let report = file::export(&export, &[levi_run(), gstar_run()]).unwrap();
    assert_eq!(report.written, vec![target.clone()]);

    let bytes = fs::read(&target).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
    assert_eq!(report.sites.len(), 2);
    assert_eq!(report.sites[0].kept, 2);
    assert_eq!(report.sites[0].dropped, 1);
    assert_eq!(report.sites[0].skipped, 1);
}

#[test]
fn workbook_overwrites_existing_file() {
    let dir = tmp_dir("xlsx_overwrite");
    let target = dir.join("product_details.xlsx");
    fs::write(&target, "stale").unwrap();

    let mut export = ExportOptions::default();
    export.set_path(target.to_str().unwrap());
    file::export(&export, &[levi_run()]).unwrap();

    assert!(fs::read(&target).unwrap().starts_with(b"PK"));
}

#[test]
fn csv_writes_one_file_per_sheet() {
    let dir = tmp_dir("csv");
    let mut export = ExportOptions::default();
    export.format = ExportFormat::Csv;
    export.set_path(dir.to_str().unwrap());
    export.report_skipped = true;

    let report = file::export(&export, &[levi_run()]).unwrap();
    assert_eq!(report.written, vec![dir.join("Levi.csv"), dir.join("Skipped.csv")]);

    let mut rdr = csv::Reader::from_path(dir.join("Levi.csv")).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec![
            "Product Url",
            "Product Name",
            "Product Overview",
            "How it Fits",
            "Composition & Care",
            "Image URL",
            "Price"
        ]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][1], "511™ Slim, Stretch");

    let mut rdr = csv::Reader::from_path(dir.join("Skipped.csv")).unwrap();
    let skipped: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(&skipped[0][0], "Levi");
    assert_eq!(&skipped[0][2], "HTTP 503 from https://www.levi.com/p/3");
}

#[test]
fn tsv_keeps_multiline_cells_intact() {
    let dir = tmp_dir("tsv");
    let mut export = ExportOptions::default();
    export.format = ExportFormat::Tsv;
    export.set_path(dir.to_str().unwrap());

    let report = file::export(&export, &[gstar_run()]).unwrap();
    assert_eq!(report.written, vec![dir.join("G-star-raw.tsv")]);

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(dir.join("G-star-raw.tsv"))
        .unwrap();
    assert_eq!(rdr.headers().unwrap().len(), 8);

    let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][3], "Skinny fit\nHigh waist");
    assert_eq!(&rows[0][5], r#"Inseam: 30""#);
    assert_eq!(&rows[0][6], "");
}

#[test]
fn delimited_export_into_a_file_path_fails() {
    let dir = tmp_dir("csv_blocked");
    let blocker = dir.join("taken");
    fs::write(&blocker, "x").unwrap();

    let mut export = ExportOptions::default();
    export.format = ExportFormat::Csv;
    export.set_path(blocker.to_str().unwrap());

    match file::export(&export, &[levi_run()]) {
        Err(ExportError::NotADirectory(path)) => assert_eq!(path, blocker),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn oversized_description_still_exports() {
    let dir = tmp_dir("xlsx_long_cell");
    let target = dir.join("long.xlsx");

    let mut run = gstar_run();
    run.records[0].overview = "denim ".repeat(10_000);

    let mut export = ExportOptions::default();
    export.set_path(target.to_str().unwrap());

    let report = file::export(&export, &[run]).unwrap();
    assert_eq!(report.written, vec![target.clone()]);
    assert!(fs::read(&target).unwrap().starts_with(b"PK"));
}
