//! Compliance service trait and report types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compile::{CompiledAcquisition, Compiler};
use crate::error::Result;
use crate::schema::AcquisitionForm;

/// Outcome for one field of a compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// Field name.
    pub field: String,

    /// Series name for variable fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,

    /// The compiled constraint that was checked.
    pub expected: Value,

    /// Value found in the checked session, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,

    /// Whether the field complied.
    pub passed: bool,

    /// Explanation from the engine.
    #[serde(default)]
    pub message: String,
}

/// Report returned by a compliance service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub records: Vec<ComplianceRecord>,
}

impl ComplianceReport {
    /// Whether every record passed.
    pub fn passed(&self) -> bool {
        self.records.iter().all(|r| r.passed)
    }

    /// Records that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &ComplianceRecord> {
        self.records.iter().filter(|r| !r.passed)
    }
}

/// The external engine that consumes compiled acquisitions.
///
/// The core never knows how the engine is hosted; callers inject an
/// implementation. `compile` defaults to the built-in lenient compiler.
pub trait ComplianceService: Send + Sync {
    /// Compile a form snapshot into the engine's input.
    fn compile(&self, form: &AcquisitionForm) -> Result<CompiledAcquisition> {
        Compiler::new().compile(form)
    }

    /// Check a compiled acquisition and report per-field outcomes.
    fn validate(&self, acquisition: &CompiledAcquisition) -> Result<ComplianceReport>;
}
