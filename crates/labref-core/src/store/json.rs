use crate::error::LabRefError;
use crate::model::RawRow;
use serde_json::Value;

/// Parse extractor output: a JSON array of rows, each an array of cells.
///
/// Cells may be strings, numbers, booleans or null; null becomes an empty
/// cell and scalars are stringified.
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawRow>, LabRefError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let rows = value
        .as_array()
        .ok_or_else(|| LabRefError::Import("expected a JSON array of rows".into()))?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let cells = row.as_array().ok_or_else(|| {
                LabRefError::Import(format!("row {} is not an array of cells", i))
            })?;
            cells
                .iter()
                .map(|cell| cell_as_string(cell).map_err(|e| LabRefError::Import(format!("row {}: {}", i, e))))
                .collect::<Result<Vec<_>, _>>()
                .map(RawRow::new)
        })
        .collect()
}

fn cell_as_string(cell: &Value) -> Result<String, String> {
    match cell {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) | Value::Object(_) => Err("nested values are not allowed in cells".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let json = r#"[["09026", "胎兒蛋白", null, " AFP "], [], [1, true]]"#;
        let rows = parse_rows(json.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cells(), &["09026", "胎兒蛋白", "", "AFP"]);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2].cells(), &["1", "true"]);
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            parse_rows(br#"{"rows": []}"#),
            Err(LabRefError::Import(_))
        ));
    }

    #[test]
    fn test_nested_cell_rejected() {
        let err = parse_rows(br#"[["a"], ["b", ["c"]]]"#).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_rows(b"not json"), Err(LabRefError::Json(_))));
    }
}
