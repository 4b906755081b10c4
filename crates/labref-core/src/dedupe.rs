use crate::model::NormalizedRecord;
use crate::rules::schema::DedupeKey;
use std::collections::HashSet;

/// Drop repeated records, keeping the first occurrence of each key.
///
/// One logical test often spans several raw rows that each normalize to the
/// same visible fields.
pub fn dedupe(records: Vec<NormalizedRecord>, key: DedupeKey) -> Vec<NormalizedRecord> {
    match key {
        DedupeKey::Identity => {
            let mut seen: HashSet<(String, String, String)> = HashSet::new();
            records
                .into_iter()
                .filter(|r| {
                    seen.insert((
                        r.code.clone(),
                        r.english_name.clone(),
                        r.sub_item.clone(),
                    ))
                })
                .collect()
        }
        DedupeKey::FullRecord => {
            let mut seen: HashSet<NormalizedRecord> = HashSet::new();
            records
                .into_iter()
                .filter(|r| seen.insert(r.clone()))
                .collect()
        }
    }
}
