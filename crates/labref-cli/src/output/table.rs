use labref_core::classify::outcome::{SearchOutcome, SearchReport};
use labref_core::model::{NormalizedRecord, RawRow, NONE};

pub fn print(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::NotIssued => {
            println!("Enter a test code, Chinese name, English name or sub-item.");
        }
        SearchOutcome::NoMatches { query, candidates } => {
            if *candidates == 0 {
                println!("No rows match '{}'.", query);
            } else {
                println!(
                    "No usable records for '{}' ({} matching row(s) were filtered out).",
                    query, candidates
                );
            }
        }
        SearchOutcome::Found(report) => print_report(report),
    }
}

fn print_report(report: &SearchReport) {
    println!(
        "Found {} record(s) for '{}'\n",
        report.records.len(),
        report.query
    );

    for (i, record) in report.records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_record(record);
    }

    let rejected = report.rejected.total();
    if rejected > 0 || report.duplicates_removed > 0 {
        println!();
        println!(
            "  ({} candidate row(s): {} rejected, {} duplicate(s) removed)",
            report.candidates, rejected, report.duplicates_removed
        );
    }
}

fn print_record(record: &NormalizedRecord) {
    println!("=== {} ===", record.title());
    print_field("Code", &record.code);
    print_field("Sub-item", &record.sub_item);
    print_field("Age/sex", &record.age_qualifier);
    print_field("Reference", &record.reference_value);
    print_field("Notes", &record.clinical_notes);
}

fn print_field(label: &str, value: &str) {
    if value != NONE {
        println!("  {:<10} {}", label, value);
    }
}

/// Matched rows as stored, for diagnosing why nothing survived.
pub fn print_raw(rows: &[&RawRow]) {
    if rows.is_empty() {
        return;
    }
    println!("\nRaw matching rows:");
    for row in rows {
        println!("  {}", row.cells().join(" | "));
    }
}
