use chrono::{DateTime, Local};
use labref_core::error::LabRefError;
use labref_core::store::sqlite::SqliteStore;
use std::path::Path;

pub fn run(db: &Path) -> Result<(), LabRefError> {
    let store = SqliteStore::new(db);

    let updated = match store.last_modified() {
        Some(time) => DateTime::<Local>::from(time)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "not created yet".to_string(),
    };

    println!("Database:     {}", db.display());
    println!("Last update:  {}", updated);

    match store.count_rows() {
        Ok(count) => println!("Rows:         {}", count),
        Err(LabRefError::DataUnavailable(reason)) => println!("Rows:         unavailable ({})", reason),
        Err(e) => return Err(e),
    }

    Ok(())
}
