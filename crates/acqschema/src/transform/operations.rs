//! Operations that move an acquisition form from one snapshot to the next.

use serde::{Deserialize, Serialize};

use crate::schema::FieldDatum;

/// A transition applied to an acquisition form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormOperation {
    /// Turn a constant field into a variable column.
    MakeVariable { field_id: String },

    /// Turn a variable column into a constant field.
    MakeConstant { column: String },

    /// Remove a variable column from every series.
    DeleteVariableColumn { column: String },

    /// Append an unfilled series.
    AddSeries,

    /// Remove one series.
    DeleteSeries { index: usize },

    /// Add a constant field.
    AddConstant { name: String, datum: FieldDatum },

    /// Edit a constant field.
    UpdateConstant {
        field_id: String,
        name: String,
        datum: FieldDatum,
    },

    /// Remove a constant field.
    DeleteConstant { field_id: String },

    /// Edit one series' value for a column.
    UpdateCell {
        index: usize,
        column: String,
        datum: FieldDatum,
    },
}

impl FormOperation {
    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            FormOperation::MakeVariable { field_id } => {
                format!("Make '{}' variable", field_id)
            }
            FormOperation::MakeConstant { column } => format!("Make '{}' constant", column),
            FormOperation::DeleteVariableColumn { column } => {
                format!("Delete column '{}'", column)
            }
            FormOperation::AddSeries => "Add series".to_string(),
            FormOperation::DeleteSeries { index } => format!("Delete series {}", index + 1),
            FormOperation::AddConstant { name, datum } => {
                format!("Add constant '{}' ({})", name, datum.constraint())
            }
            FormOperation::UpdateConstant { field_id, .. } => {
                format!("Update constant '{}'", field_id)
            }
            FormOperation::DeleteConstant { field_id } => {
                format!("Delete constant '{}'", field_id)
            }
            FormOperation::UpdateCell { index, column, .. } => {
                format!("Update '{}' in series {}", column, index + 1)
            }
        }
    }

    /// Whether the operation can remove a column from every series, which
    /// is when duplicate series may appear.
    pub fn removes_column(&self) -> bool {
        matches!(
            self,
            FormOperation::MakeConstant { .. } | FormOperation::DeleteVariableColumn { .. }
        )
    }
}

/// Summary of one applied operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormChange {
    /// Description of the change.
    pub description: String,

    /// Number of series before the operation.
    pub series_before: usize,

    /// Number of series after the operation.
    pub series_after: usize,

    /// Series the operator should edit next, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<usize>,
}

impl FormChange {
    /// Series that disappeared, through deletion or deduplication.
    pub fn series_removed(&self) -> usize {
        self.series_before.saturating_sub(self.series_after)
    }
}
