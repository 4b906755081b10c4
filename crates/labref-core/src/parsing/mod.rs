pub mod normalize;
pub mod notes;
pub mod values;

use crate::classify::flexible::FlexibleCell;
use crate::classify::outcome::{RejectReason, RowOutcome};
use crate::classify::value::ValueClassifier;
use crate::filter::GarbageFilter;
use crate::model::{or_none, NormalizedRecord, RawRow, NONE};
use crate::rules::schema::PipelineConfig;
use normalize::{clean_text, has_cjk, is_latin_name};
use notes::extract_clinical_notes;
use values::{extract_age_qualifier, scan_reference_columns};

/// Turns one raw table row into a [`NormalizedRecord`], or rejects it.
///
/// All positional knowledge about the extractor's layout lives here.
#[derive(Debug, Clone)]
pub struct RowNormalizer {
    config: PipelineConfig,
    classifier: ValueClassifier,
    filter: GarbageFilter,
}

impl RowNormalizer {
    pub fn new(config: PipelineConfig) -> Self {
        let classifier = ValueClassifier::new(&config.classifier);
        let filter = GarbageFilter::new(&config.bleed_rules);
        RowNormalizer {
            config,
            classifier,
            filter,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &ValueClassifier {
        &self.classifier
    }

    pub fn normalize(&self, row: &RawRow) -> RowOutcome {
        let layout = &self.config.layout;

        let mut code = clean_text(row.cell(layout.code));
        let mut chinese = clean_text(row.cell(layout.chinese_name));
        let mut english = clean_text(row.cell(layout.english_name));
        let flexible = clean_text(row.cell(layout.flexible));

        // Upstream column shift: the Chinese name landed in the code column.
        if has_cjk(&code) && chinese.is_empty() {
            chinese = std::mem::take(&mut code);
        }

        if english.is_empty() && is_latin_name(&chinese) {
            english = chinese.clone();
        }

        let code = self.name_or_none(code);
        let chinese = self.name_or_none(chinese);
        let english = self.name_or_none(english);
        if chinese == NONE && english == NONE {
            return RowOutcome::Rejected(RejectReason::MissingNames);
        }

        let cell = match FlexibleCell::classify(&flexible, &self.classifier, &self.config.sub_items)
        {
            Ok(cell) => cell,
            Err(_) => return RowOutcome::Rejected(RejectReason::TitleRow),
        };

        let sub_item = cell.sub_item().unwrap_or(NONE).to_string();

        let age_qualifier = extract_age_qualifier(row.cell(layout.age), &self.config.age_indicators);

        let reference_value = match cell.reference_value() {
            Some(direct) => direct.to_string(),
            None => {
                // An age cell without an age indicator may still carry the range.
                let mut columns = Vec::with_capacity(layout.reference.len() + 1);
                if age_qualifier == NONE && !layout.reference.contains(&layout.age) {
                    columns.push(layout.age);
                }
                columns.extend_from_slice(&layout.reference);
                scan_reference_columns(row, &columns, &self.classifier, &self.config.reference)
            }
        };

        let clinical_notes =
            extract_clinical_notes(row, layout.notes_start, &self.classifier, &self.config.notes);

        let record = NormalizedRecord {
            code,
            chinese_name: chinese,
            english_name: english,
            sub_item,
            age_qualifier,
            reference_value,
            clinical_notes,
        };

        if self
            .filter
            .is_garbage(&record.clinical_notes, &record.english_name)
        {
            return RowOutcome::Rejected(RejectReason::Garbage);
        }

        if record.has_no_detail() {
            return RowOutcome::Rejected(RejectReason::NoDetail);
        }

        RowOutcome::Accepted(record)
    }

    fn name_or_none(&self, value: String) -> String {
        if self.classifier.is_placeholder(&value) {
            NONE.to_string()
        } else {
            or_none(value)
        }
    }
}
