//! End-to-end tests for search_and_normalize() over realistic manual rows.
//!
//! Rows mimic the column layout of the extracted manual tables: code,
//! Chinese name, English name, flexible column, age, reference columns and
//! clinical notes from column 7 on.

use labref_core::cache::SnapshotCache;
use labref_core::classify::outcome::SearchOutcome;
use labref_core::model::{RawRow, NONE};
use labref_core::rules::schema::{DedupeKey, SearchDef};
use labref_core::store::fill::forward_fill;
use labref_core::store::json::parse_rows;
use labref_core::store::sqlite::SqliteStore;
use labref_core::store::RowSource;
use labref_core::Pipeline;
use std::time::Duration;

fn row(cells: &[&str]) -> RawRow {
    RawRow::from_strs(cells)
}

fn manual() -> Vec<RawRow> {
    vec![
        row(&["臨床意義", "", "", "", "", "", "", "臨床意義"]),
        row(&["09026", "胎兒蛋白", "Alpha-Fetoprotein (AFP)", "血清", "", "<10 ng/mL", "", "肝細胞癌時明顯上升"]),
        row(&["09026", "胎兒蛋白", "alpha-fetoprotein (afp)", "血清", "", "<10 ng/mL", "", "肝細胞癌時明顯上升"]),
        row(&["09026", "胎兒蛋白", "Alpha-Fetoprotein (AFP)", "", "", "<10 ng/mL", "", "懷孕時亦上升"]),
        row(&["09040", "總蛋白", "TotalProtein", "", "", "6.0-8.3 g/dL", "", "脫水時上升"]),
        row(&["08011", "全套血液檢查", "CBC", "組套項目", "", "", "", ""]),
        row(&["08011", "全套血液檢查", "CBC", "3 WBC(10/ul)", "", "4.0-10.0", "", "感染時上升"]),
        row(&["08011", "全套血液檢查", "CBC", "4 RBC(10^6/ul)", "M", "4.5-5.9", "", "貧血時下降"]),
        row(&["08011", "全套血液檢查", "CBC", "4 RBC(10^6/ul)", "F", "4.0-5.2", "", "貧血時下降"]),
        row(&["09025", "麩草轉胺基酶", "AST (GOT)", "", "", "<40 U/L", "", "肝炎時上升"]),
        row(&["27004", "乳癌標記", "BREAST cancer marker CA15-3", "", "", "<25 U/mL", "", "乳癌追蹤"]),
        row(&["09005", "飯前血糖", "Glucose AC", "", "", "70-100 mg/dL", "", "APTT延長見於凝血因子缺乏"]),
        row(&["12007", "尿蛋白", "Urine Protein", "negative", "", "", "", "腎病變時陽性"]),
        row(&["11003", "ABO血型", "ABO Blood Typing", "", "", "", "", "輸血前須確認血型"]),
    ]
}

fn pipeline() -> Pipeline {
    Pipeline::builtin().unwrap()
}

#[test]
fn code_search_returns_rows_bearing_code() {
    let rows = manual();
    let p = pipeline();
    assert_eq!(p.search(&rows, "09026").len(), 3);

    let outcome = p.search_and_normalize(&rows, "09026");
    let records = outcome.records();
    // the third row repeats the first one's identity; the second differs only in letter case
    assert!(records.iter().all(|r| r.code == "09026"));
    assert!(records.iter().all(|r| r.reference_value == "<10 ng/mL"));
    assert_eq!(records.len(), 2);
}

#[test]
fn whitespace_insensitive_query() {
    let rows = manual();
    let outcome = pipeline().search_and_normalize(&rows, "Total Protein");
    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].english_name, "TotalProtein");
    assert_eq!(records[0].reference_value, "6.0-8.3 g/dL");
}

#[test]
fn panel_rows_split_into_sub_items() {
    let rows = manual();
    let outcome = pipeline().search_and_normalize(&rows, "CBC");
    let SearchOutcome::Found(report) = outcome else {
        panic!("expected records for CBC");
    };

    let subs: Vec<&str> = report.records.iter().map(|r| r.sub_item.as_str()).collect();
    assert_eq!(subs, vec!["WBC(10/ul)", "RBC(10^6/ul)"]);
    assert_eq!(report.candidates, 4);
    assert_eq!(report.rejected.title_row, 1);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.records[1].age_qualifier, "M");
}

#[test]
fn full_record_dedupe_keeps_age_variants() {
    let rows = manual();
    let p = pipeline().with_dedupe(DedupeKey::FullRecord);
    let outcome = p.search_and_normalize(&rows, "RBC");
    let ages: Vec<&str> = outcome
        .records()
        .iter()
        .map(|r| r.age_qualifier.as_str())
        .collect();
    assert_eq!(ages, vec!["M", "F"]);
}

#[test]
fn flexible_negative_becomes_reference() {
    let rows = manual();
    let outcome = pipeline().search_and_normalize(&rows, "尿蛋白");
    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reference_value, "Negative");
    assert_eq!(records[0].sub_item, NONE);
}

#[test]
fn bled_notes_never_reach_output() {
    let rows = manual();
    let outcome = pipeline().search_and_normalize(&rows, "Glucose");
    assert!(matches!(
        outcome,
        SearchOutcome::NoMatches { candidates: 1, .. }
    ));
}

#[test]
fn blood_typing_row_with_matching_name_kept() {
    let rows = manual();
    let outcome = pipeline().search_and_normalize(&rows, "ABO");
    assert_eq!(outcome.records().len(), 1);
    assert_eq!(outcome.records()[0].clinical_notes, "輸血前須確認血型");
}

#[test]
fn header_phrase_never_in_notes() {
    let rows = manual();
    let p = pipeline();
    for query in ["0", "A", "蛋白", "CBC"] {
        for record in p.search_and_normalize(&rows, query).records() {
            assert!(!record.clinical_notes.contains("臨床意義"));
        }
    }
}

#[test]
fn strict_mode_applies_word_boundary() {
    let rows = manual();
    let loose = pipeline().search_and_normalize(&rows, "AST");
    assert_eq!(loose.records().len(), 2);

    let strict = pipeline()
        .with_search(SearchDef::strict())
        .search_and_normalize(&rows, "AST");
    assert_eq!(strict.records().len(), 1);
    assert_eq!(strict.records()[0].code, "09025");
}

#[test]
fn blank_query_is_not_issued() {
    let rows = manual();
    assert!(matches!(
        pipeline().search_and_normalize(&rows, "  "),
        SearchOutcome::NotIssued
    ));
    assert!(matches!(
        pipeline().search_and_normalize(&rows, "no such test"),
        SearchOutcome::NoMatches { candidates: 0, .. }
    ));
}

#[test]
fn import_fill_store_and_search() {
    let json = r#"[
        ["08011", "全套血液檢查", "CBC", "3 WBC(10/ul)", null, "4.0-10.0", null, "感染時上升"],
        ["", "", "", "4 RBC(10^6/ul)", "", "4.5-5.9", "", "貧血時下降"]
    ]"#;
    let mut rows = parse_rows(json.as_bytes()).unwrap();
    forward_fill(&mut rows);

    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::new(dir.path().join("lab_test.db"));
    store.replace_rows(&rows).unwrap();

    let mut cache = SnapshotCache::new(store, Duration::from_secs(600));
    let snapshot = cache.rows().unwrap();
    let outcome = pipeline().search_and_normalize(&snapshot, "rbc");
    let records = outcome.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].code, "08011");
    assert_eq!(records[0].chinese_name, "全套血液檢查");
    assert_eq!(records[0].sub_item, "RBC(10^6/ul)");
    assert_eq!(cache.source().backend_name(), "sqlite");
}
