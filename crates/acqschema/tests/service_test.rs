//! Tests for the compliance service seam.

use acqschema::service::{ComplianceRecord, ComplianceReport, ComplianceService, MockComplianceService};
use acqschema::{
    AcqSchemaError, AcquisitionBuilder, AcquisitionForm, CompiledAcquisition, ConstantField,
    FieldDatum, Result, SampleSet, VariableRow,
};
use serde_json::json;

/// A service whose engine is unavailable.
struct OfflineService;

impl ComplianceService for OfflineService {
    fn validate(&self, _acquisition: &CompiledAcquisition) -> Result<ComplianceReport> {
        Err(AcqSchemaError::Service("engine not loaded".to_string()))
    }
}

fn bold_form() -> AcquisitionForm {
    AcquisitionForm::new(
        vec![ConstantField::new("Manufacturer", FieldDatum::text("SIEMENS"))],
        vec![
            VariableRow::new("1").with_field("EchoTime", FieldDatum::with_tolerance("30", "1")),
            VariableRow::new("2").with_field("EchoTime", FieldDatum::with_tolerance("35", "1")),
        ],
    )
    .unwrap()
}

#[test]
fn test_mock_receives_compiled_payload() {
    let service = MockComplianceService::new();
    let acquisition = service.compile(&bold_form()).unwrap();
    let report = service.validate(&acquisition).unwrap();

    assert!(report.passed());
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[1].expected, json!({"value": 30, "tolerance": 1}));

    let received = service.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0], acquisition);
}

#[test]
fn test_builder_check_with_failing_field() {
    let samples = SampleSet::from_json_str(
        r#"[
            {"ProtocolName": "BOLD", "Manufacturer": "SIEMENS", "EchoTime": 30},
            {"ProtocolName": "BOLD", "Manufacturer": "SIEMENS", "EchoTime": 35}
        ]"#,
    )
    .unwrap();

    let builder = AcquisitionBuilder::new().with_service(MockComplianceService::new().failing("EchoTime"));
    let form = builder.seed(&samples, "BOLD", &["Manufacturer", "EchoTime"]).unwrap();
    let report = builder.check(&form).unwrap();

    let failures: Vec<&ComplianceRecord> = report.failures().collect();
    assert_eq!(failures.len(), 2);
    assert!(failures.iter().all(|r| r.field == "EchoTime"));
    assert_eq!(failures[0].series.as_deref(), Some("1"));
    assert_eq!(failures[1].series.as_deref(), Some("2"));
}

#[test]
fn test_service_errors_propagate() {
    let builder = AcquisitionBuilder::new().with_service(OfflineService);
    let err = builder.check(&bold_form()).unwrap_err();
    assert!(matches!(err, AcqSchemaError::Service(_)));
}

#[test]
fn test_report_serializes() {
    let report = ComplianceReport {
        records: vec![ComplianceRecord {
            field: "FlipAngle".to_string(),
            series: None,
            expected: json!({"value": 90}),
            actual: Some(json!(60)),
            passed: false,
            message: "expected 90".to_string(),
        }],
    };

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["records"][0]["actual"], json!(60));
    assert!(value["records"][0].get("series").is_none());

    let parsed: ComplianceReport = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, report);
}
