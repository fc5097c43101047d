//! Sampled metadata rows and per-acquisition extraction.

use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::{AcqSchemaError, Result};
use crate::inference::display_value;

/// One sampled record: field name to raw scalar or array value.
pub type SampleRow = IndexMap<String, Value>;

/// Field that groups records into acquisitions unless configured otherwise.
pub const DEFAULT_ACQUISITION_FIELD: &str = "ProtocolName";

/// A set of sampled records spanning one or more acquisitions.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    rows: Vec<SampleRow>,
    acquisition_field: String,
}

impl SampleSet {
    /// Wrap records grouped by the default acquisition field.
    pub fn new(rows: Vec<SampleRow>) -> Self {
        Self {
            rows,
            acquisition_field: DEFAULT_ACQUISITION_FIELD.to_string(),
        }
    }

    /// Group records by another field.
    pub fn with_acquisition_field(mut self, field: impl Into<String>) -> Self {
        self.acquisition_field = field.into();
        self
    }

    /// All records.
    pub fn rows(&self) -> &[SampleRow] {
        &self.rows
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The grouping field.
    pub fn acquisition_field(&self) -> &str {
        &self.acquisition_field
    }

    /// Distinct acquisition names in first-seen order.
    pub fn acquisitions(&self) -> Vec<String> {
        let names: IndexSet<String> = self
            .rows
            .iter()
            .filter_map(|row| row.get(&self.acquisition_field))
            .map(display_value)
            .collect();
        names.into_iter().collect()
    }

    /// Every field name in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let names: IndexSet<&String> = self.rows.iter().flat_map(|row| row.keys()).collect();
        names.into_iter().cloned().collect()
    }

    /// Records belonging to one acquisition.
    pub fn acquisition_rows<'a>(&'a self, acquisition: &'a str) -> impl Iterator<Item = &'a SampleRow> {
        self.rows.iter().filter(move |row| {
            row.get(&self.acquisition_field)
                .is_some_and(|v| display_value(v) == acquisition)
        })
    }

    /// Distinct projections of one acquisition's records on `fields`,
    /// sorted by those fields.
    ///
    /// An empty selection yields no rows. Selecting a field no record
    /// carries is an error.
    pub fn unique_rows<S: AsRef<str>>(&self, acquisition: &str, fields: &[S]) -> Result<Vec<SampleRow>> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let known: HashSet<&str> = self
            .rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();
        let missing: Vec<String> = fields
            .iter()
            .map(|f| f.as_ref().trim())
            .filter(|f| !known.contains(f))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(AcqSchemaError::MissingFields(missing));
        }

        let mut seen = HashSet::new();
        let mut unique: Vec<SampleRow> = self
            .acquisition_rows(acquisition)
            .map(|row| {
                fields
                    .iter()
                    .map(|f| {
                        let name = f.as_ref().trim();
                        (name.to_string(), row.get(name).cloned().unwrap_or(Value::Null))
                    })
                    .collect::<SampleRow>()
            })
            .filter(|projected| seen.insert(hashable(projected)))
            .collect();

        unique.sort_by(|a, b| {
            a.values()
                .zip(b.values())
                .map(|(x, y)| compare_values(x, y))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        Ok(unique)
    }
}

fn hashable(row: &SampleRow) -> String {
    row.values()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\u{1f}")
}

/// Total order over sampled values: numbers numerically, strings
/// lexically, nulls last, anything else by its JSON text.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}
