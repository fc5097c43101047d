//! Field-level issues raised at the editing boundary.

use serde::{Deserialize, Serialize};

/// Category of a field issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The field has no name.
    MissingName,
    /// A slot required by the constraint kind is blank.
    MissingValue,
    /// A number-kind slot does not parse as a number.
    NotANumber,
    /// A raw JSON value does not parse.
    InvalidJson,
}

impl IssueKind {
    /// Get a human-readable label for the issue kind.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::MissingName => "Missing Name",
            IssueKind::MissingValue => "Missing Value",
            IssueKind::NotANumber => "Not A Number",
            IssueKind::InvalidJson => "Invalid JSON",
        }
    }
}

/// A problem with one field's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field name as entered.
    pub field: String,
    /// Issue category.
    pub kind: IssueKind,
    /// Human-readable message.
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}
