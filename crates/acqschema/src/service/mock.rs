//! Mock compliance service for testing.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::compile::{CompiledAcquisition, CompiledField};
use crate::error::{AcqSchemaError, Result};

use super::provider::{ComplianceRecord, ComplianceReport, ComplianceService};

/// Mock service that reports every field as passing unless told otherwise,
/// and remembers what it was asked to validate.
#[derive(Default)]
pub struct MockComplianceService {
    failing: HashSet<String>,
    received: Mutex<Vec<CompiledAcquisition>>,
}

impl MockComplianceService {
    /// Create a new mock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `field` as failing.
    pub fn failing(mut self, field: impl Into<String>) -> Self {
        self.failing.insert(field.into());
        self
    }

    /// Acquisitions passed to `validate` so far.
    pub fn received(&self) -> Vec<CompiledAcquisition> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }

    fn record(&self, field: &CompiledField, series: Option<&str>) -> ComplianceRecord {
        let passed = !self.failing.contains(&field.field);
        ComplianceRecord {
            field: field.field.clone(),
            series: series.map(str::to_string),
            expected: serde_json::to_value(&field.constraint).unwrap_or_default(),
            actual: None,
            passed,
            message: if passed {
                "ok".to_string()
            } else {
                format!("'{}' does not match the reference", field.field)
            },
        }
    }
}

impl ComplianceService for MockComplianceService {
    fn validate(&self, acquisition: &CompiledAcquisition) -> Result<ComplianceReport> {
        self.received
            .lock()
            .map_err(|e| AcqSchemaError::Service(e.to_string()))?
            .push(acquisition.clone());

        let mut records: Vec<ComplianceRecord> = acquisition
            .fields
            .iter()
            .map(|field| self.record(field, None))
            .collect();
        for series in &acquisition.series {
            records.extend(
                series
                    .fields
                    .iter()
                    .map(|field| self.record(field, Some(&series.name))),
            );
        }

        Ok(ComplianceReport { records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AcquisitionForm, ConstantField, FieldDatum, VariableRow};

    #[test]
    fn test_mock_reports_failures() {
        let form = AcquisitionForm::new(
            vec![ConstantField::new("Manufacturer", FieldDatum::text("SIEMENS"))],
            vec![VariableRow::new("1").with_field("EchoTime", FieldDatum::text("30"))],
        )
        .unwrap();

        let service = MockComplianceService::new().failing("EchoTime");
        let acquisition = service.compile(&form).unwrap();
        let report = service.validate(&acquisition).unwrap();

        assert_eq!(report.records.len(), 2);
        assert!(!report.passed());
        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].series.as_deref(), Some("1"));
        assert_eq!(service.received().len(), 1);
    }
}
