//! Loading sampled records from JSON or delimited text.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::compile::is_numeric;
use crate::error::{AcqSchemaError, Result};

use super::samples::{SampleRow, SampleSet};

impl SampleSet {
    /// Parse a JSON array of records.
    pub fn from_json_str(input: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(input)? {
            Value::Array(items) => {
                let rows = items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(map) => Ok(map.into_iter().collect::<SampleRow>()),
                        other => Err(AcqSchemaError::UnsupportedFormat(format!(
                            "expected a record object, found {}",
                            other
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::new(rows))
            }
            _ => Err(AcqSchemaError::UnsupportedFormat(
                "expected a JSON array of records".to_string(),
            )),
        }
    }

    /// Parse delimited text with a header row.
    ///
    /// Empty cells become `null`, numeric cells become numbers, and cells
    /// holding a JSON array literal become arrays.
    pub fn from_delimited<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: SampleRow = headers
                .iter()
                .zip(record.iter())
                .map(|(name, cell)| (name.clone(), cell_value(cell)))
                .collect();
            rows.push(row);
        }

        Ok(Self::new(rows))
    }

    /// Load records from a `.json`, `.csv` or `.tsv` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| AcqSchemaError::Io {
            path: path.to_path_buf(),
            source,
        };

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => {
                let contents = fs::read_to_string(path).map_err(io_err)?;
                Self::from_json_str(&contents)
            }
            "csv" | "tsv" => {
                let file = fs::File::open(path).map_err(io_err)?;
                let delimiter = if extension == "tsv" { b'\t' } else { b',' };
                Self::from_delimited(file, delimiter)
            }
            other => Err(AcqSchemaError::UnsupportedFormat(format!(
                "cannot read samples from '.{}' files",
                other
            ))),
        }
    }
}

fn cell_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if is_numeric(trimmed) {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::from(f);
        }
    }
    if trimmed.starts_with('[') {
        if let Ok(array @ Value::Array(_)) = serde_json::from_str::<Value>(trimmed) {
            return array;
        }
    }
    Value::String(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_from_json_str() {
        let set = SampleSet::from_json_str(r#"[{"ProtocolName": "T1", "EchoTime": 3.1}]"#).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.rows()[0]["EchoTime"], json!(3.1));

        assert!(SampleSet::from_json_str(r#"{"rows": []}"#).is_err());
        assert!(SampleSet::from_json_str(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn test_from_delimited_typed_cells() {
        let text = "ProtocolName,EchoTime,ImageType,Notes\nT1,3.1,\"[\"\"M\"\",\"\"ND\"\"]\",\nT1,30,[x,\n";
        let set = SampleSet::from_delimited(text.as_bytes(), b',').unwrap();

        let first = &set.rows()[0];
        assert_eq!(first["EchoTime"], json!(3.1));
        assert_eq!(first["ImageType"], json!(["M", "ND"]));
        assert_eq!(first["Notes"], Value::Null);

        let second = &set.rows()[1];
        assert_eq!(second["EchoTime"], json!(30));
        assert_eq!(second["ImageType"], json!("[x"));
    }

    #[test]
    fn test_load_by_extension() {
        let mut file = Builder::new().suffix(".tsv").tempfile().unwrap();
        file.write_all(b"ProtocolName\tFlipAngle\nT2\t90\n").unwrap();

        let set = SampleSet::load(file.path()).unwrap();
        assert_eq!(set.acquisitions(), vec!["T2"]);
        assert_eq!(set.rows()[0]["FlipAngle"], json!(90));

        let other = Builder::new().suffix(".dcm").tempfile().unwrap();
        assert!(matches!(
            SampleSet::load(other.path()),
            Err(AcqSchemaError::UnsupportedFormat(_))
        ));
    }
}
