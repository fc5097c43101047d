//! Constant fields, variable rows and the acquisition form snapshot.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AcqSchemaError, Result};

use super::datum::FieldDatum;

/// Key of the mandatory series label in every variable row.
pub const SERIES_FIELD: &str = "Series";

/// A field asserted to hold one value across the whole acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantField {
    /// Stable identifier used by operations.
    pub id: String,
    /// Field name as written to the compiled output.
    pub name: String,
    /// The constraint.
    pub datum: FieldDatum,
}

impl ConstantField {
    /// Create a constant whose identifier is its name.
    pub fn new(name: impl Into<String>, datum: FieldDatum) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            datum,
        }
    }

    /// Create a constant with an identifier not used by `existing`.
    ///
    /// The name is used as the identifier when free, otherwise `name#2`,
    /// `name#3`, ... Renamed constants keep their old identifier, so a new
    /// constant may take a name whose identifier is still in use.
    pub fn unique(name: impl Into<String>, datum: FieldDatum, existing: &[ConstantField]) -> Self {
        let mut field = Self::new(name, datum);
        let taken = |id: &str| existing.iter().any(|c| c.id == id);
        let mut suffix = 2;
        while taken(&field.id) {
            field.id = format!("{}#{}", field.name, suffix);
            suffix += 1;
        }
        field
    }
}

/// One series: a `Series` label plus the variable columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "IndexMap<String, FieldDatum>",
    into = "IndexMap<String, FieldDatum>"
)]
pub struct VariableRow {
    series: FieldDatum,
    fields: IndexMap<String, FieldDatum>,
}

impl VariableRow {
    /// Create a row with the given series label and no columns.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            series: FieldDatum::text(label),
            fields: IndexMap::new(),
        }
    }

    /// Add or replace a column.
    pub fn with_field(mut self, name: impl Into<String>, datum: FieldDatum) -> Self {
        self.fields.insert(name.into(), datum);
        self
    }

    /// The series datum.
    pub fn series(&self) -> &FieldDatum {
        &self.series
    }

    /// The series label.
    pub fn label(&self) -> &str {
        &self.series.value
    }

    /// Columns other than `Series`, in insertion order.
    pub fn fields(&self) -> &IndexMap<String, FieldDatum> {
        &self.fields
    }

    /// Datum for a column.
    pub fn get(&self, name: &str) -> Option<&FieldDatum> {
        self.fields.get(name)
    }

    /// Whether the row carries no column besides `Series`.
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn set_label(&mut self, label: impl Into<String>) {
        self.series.value = label.into();
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, datum: FieldDatum) {
        self.fields.insert(name.into(), datum);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<FieldDatum> {
        self.fields.shift_remove(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FieldDatum> {
        self.fields.get_mut(name)
    }
}

impl TryFrom<IndexMap<String, FieldDatum>> for VariableRow {
    type Error = AcqSchemaError;

    fn try_from(mut map: IndexMap<String, FieldDatum>) -> Result<Self> {
        let series = map
            .shift_remove(SERIES_FIELD)
            .ok_or_else(|| AcqSchemaError::UnknownField(SERIES_FIELD.to_string()))?;
        Ok(Self {
            series: FieldDatum::text(series.value),
            fields: map,
        })
    }
}

impl From<VariableRow> for IndexMap<String, FieldDatum> {
    fn from(row: VariableRow) -> Self {
        let mut map = IndexMap::with_capacity(row.fields.len() + 1);
        map.insert(SERIES_FIELD.to_string(), row.series);
        map.extend(row.fields);
        map
    }
}

/// Immutable snapshot of one acquisition being edited.
///
/// Constant names and variable column names never overlap, and every row
/// carries the same column set. Operations in [`crate::transform`] consume a
/// snapshot by reference and return a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawForm", into = "RawForm")]
pub struct AcquisitionForm {
    constant_fields: Vec<ConstantField>,
    rows: Vec<VariableRow>,
}

impl AcquisitionForm {
    /// Build a form, checking the disjointness and column-set invariants.
    pub fn new(constant_fields: Vec<ConstantField>, rows: Vec<VariableRow>) -> Result<Self> {
        let form = Self {
            constant_fields,
            rows,
        };
        form.check_invariants()?;
        Ok(form)
    }

    /// Form produced by an operation that maintains the invariants itself.
    pub(crate) fn from_parts(constant_fields: Vec<ConstantField>, rows: Vec<VariableRow>) -> Self {
        let form = Self {
            constant_fields,
            rows,
        };
        debug_assert!(form.check_invariants().is_ok());
        form
    }

    pub(crate) fn into_parts(self) -> (Vec<ConstantField>, Vec<VariableRow>) {
        (self.constant_fields, self.rows)
    }

    /// Constant fields in display order.
    pub fn constant_fields(&self) -> &[ConstantField] {
        &self.constant_fields
    }

    /// Variable rows in series order.
    pub fn rows(&self) -> &[VariableRow] {
        &self.rows
    }

    /// Look up a constant by identifier.
    pub fn constant(&self, id: &str) -> Option<&ConstantField> {
        self.constant_fields.iter().find(|c| c.id == id)
    }

    /// Variable column names, taken from the first row.
    pub fn column_names(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `name` is already used by a constant or a variable column.
    pub fn has_field(&self, name: &str) -> bool {
        name == SERIES_FIELD
            || self.constant_fields.iter().any(|c| c.name == name)
            || self.rows.iter().any(|r| r.fields.contains_key(name))
    }

    /// Verify unique identifiers, disjointness and identical column sets.
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut ids = HashSet::new();
        for constant in &self.constant_fields {
            if constant.name == SERIES_FIELD || !seen.insert(constant.name.as_str()) {
                return Err(AcqSchemaError::DuplicateField(constant.name.clone()));
            }
            if !ids.insert(constant.id.as_str()) {
                return Err(AcqSchemaError::DuplicateField(constant.id.clone()));
            }
        }

        if let Some(first) = self.rows.first() {
            for name in first.fields.keys() {
                if seen.contains(name.as_str()) {
                    return Err(AcqSchemaError::DuplicateField(name.clone()));
                }
            }
            for row in &self.rows[1..] {
                let same_columns = row.fields.len() == first.fields.len()
                    && row.fields.keys().all(|k| first.fields.contains_key(k));
                if !same_columns {
                    return Err(AcqSchemaError::InvalidField {
                        field: SERIES_FIELD.to_string(),
                        message: format!(
                            "series '{}' does not share the column set of series '{}'",
                            row.label(),
                            first.label()
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawForm {
    #[serde(default)]
    constant_fields: Vec<ConstantField>,
    #[serde(default)]
    variable_rows: Vec<VariableRow>,
}

impl TryFrom<RawForm> for AcquisitionForm {
    type Error = AcqSchemaError;

    fn try_from(raw: RawForm) -> Result<Self> {
        AcquisitionForm::new(raw.constant_fields, raw.variable_rows)
    }
}

impl From<AcquisitionForm> for RawForm {
    fn from(form: AcquisitionForm) -> Self {
        Self {
            constant_fields: form.constant_fields,
            variable_rows: form.rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataKind;

    #[test]
    fn test_duplicate_constant_ids_rejected() {
        let mut renamed = ConstantField::new("FlipAngle", FieldDatum::text("90"));
        renamed.name = "FA".to_string();
        let err = AcquisitionForm::new(
            vec![renamed, ConstantField::new("FlipAngle", FieldDatum::text("60"))],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, AcqSchemaError::DuplicateField(id) if id == "FlipAngle"));
    }

    #[test]
    fn test_unique_constant_id() {
        let existing = vec![
            ConstantField::new("TR", FieldDatum::text("1")),
            ConstantField::new("TR#2", FieldDatum::text("2")),
        ];
        assert_eq!(ConstantField::unique("TR", FieldDatum::text("3"), &existing).id, "TR#3");
        assert_eq!(ConstantField::unique("TE", FieldDatum::text("3"), &existing).id, "TE");
    }

    #[test]
    fn test_series_label_normalized_on_load() {
        let row: VariableRow = serde_json::from_value(serde_json::json!({
            "Series": {"constraint_type": "range", "data_type": "number", "value": "3", "min_value": "1", "max_value": "5"},
            "EchoTime": {"constraint_type": "value", "data_type": "number", "value": "30"}
        }))
        .unwrap();

        assert_eq!(row.series(), &FieldDatum::text("3"));
        assert_eq!(row.label(), "3");
    }

    #[test]
    fn test_row_serializes_with_series_key() {
        let row = VariableRow::new("1").with_field("EchoTime", FieldDatum::exact(DataKind::Number, "30"));
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["Series"]["value"], "1");
        assert_eq!(json["EchoTime"]["data_type"], "number");

        let back: VariableRow = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_row_without_series_is_rejected() {
        let json = serde_json::json!({
            "EchoTime": { "constraint_type": "value", "data_type": "number", "value": "30" }
        });
        assert!(serde_json::from_value::<VariableRow>(json).is_err());
    }

    #[test]
    fn test_form_rejects_overlap() {
        let constants = vec![ConstantField::new("EchoTime", FieldDatum::text("30"))];
        let rows = vec![VariableRow::new("1").with_field("EchoTime", FieldDatum::text("40"))];

        let err = AcquisitionForm::new(constants, rows).unwrap_err();
        assert!(matches!(err, AcqSchemaError::DuplicateField(name) if name == "EchoTime"));
    }

    #[test]
    fn test_form_rejects_ragged_rows() {
        let rows = vec![
            VariableRow::new("1").with_field("A", FieldDatum::text("x")),
            VariableRow::new("2").with_field("B", FieldDatum::text("y")),
        ];
        assert!(AcquisitionForm::new(Vec::new(), rows).is_err());
    }

    #[test]
    fn test_has_field() {
        let form = AcquisitionForm::new(
            vec![ConstantField::new("FlipAngle", FieldDatum::text("90"))],
            vec![VariableRow::new("1").with_field("EchoTime", FieldDatum::text("30"))],
        )
        .unwrap();

        assert!(form.has_field("FlipAngle"));
        assert!(form.has_field("EchoTime"));
        assert!(form.has_field(SERIES_FIELD));
        assert!(!form.has_field("RepetitionTime"));
        assert_eq!(form.column_names(), vec!["EchoTime"]);
    }
}
