//! Main acquisition builder and public API.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::compile::{Compilation, CompiledAcquisition, Compiler};
use crate::error::{AcqSchemaError, Result};
use crate::inference::seed_form;
use crate::input::{DEFAULT_ACQUISITION_FIELD, DEFAULT_DICOM_FIELDS, SampleSet};
use crate::schema::AcquisitionForm;
use crate::service::{ComplianceReport, ComplianceService};
use crate::transform::{DEFAULT_HISTORY_LIMIT, EditSession};

/// Configuration for building acquisitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Sample field that names the acquisition of each record.
    pub acquisition_field: String,
    /// Fail compilation instead of degrading unparsable values.
    pub strict: bool,
    /// Undo depth of edit sessions.
    pub history_limit: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            acquisition_field: DEFAULT_ACQUISITION_FIELD.to_string(),
            strict: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl BuilderConfig {
    /// Parse and check a JSON configuration.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| AcqSchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Reject settings the builder cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.acquisition_field.trim().is_empty() {
            return Err(AcqSchemaError::Config(
                "acquisition_field must not be empty".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(AcqSchemaError::Config(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds acquisition forms from sampled metadata and compiles them.
pub struct AcquisitionBuilder {
    config: BuilderConfig,
    compiler: Compiler,
    service: Option<Arc<dyn ComplianceService>>,
}

impl AcquisitionBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        let compiler = Compiler::new().strict(config.strict);
        Self {
            config,
            compiler,
            service: None,
        }
    }

    /// Attach a compliance service.
    ///
    /// The service only validates; compilation always goes through the
    /// builder's own compiler so `strict` holds either way.
    pub fn with_service(mut self, service: impl ComplianceService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Load samples, grouping them by the configured acquisition field.
    pub fn load_samples(&self, path: impl AsRef<Path>) -> Result<SampleSet> {
        let samples = SampleSet::load(path)?.with_acquisition_field(&self.config.acquisition_field);
        info!(
            records = samples.len(),
            acquisitions = samples.acquisitions().len(),
            "loaded samples"
        );
        Ok(samples)
    }

    /// The field selection used for `fields`: the given names trimmed, or
    /// the default list restricted to columns present in the samples.
    pub fn resolve_fields<S: AsRef<str>>(&self, samples: &SampleSet, fields: &[S]) -> Vec<String> {
        let chosen: Vec<String> = fields
            .iter()
            .map(|f| f.as_ref().trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if !chosen.is_empty() {
            return chosen;
        }

        let columns = samples.columns();
        DEFAULT_DICOM_FIELDS
            .iter()
            .filter(|f| columns.iter().any(|c| c == *f))
            .map(|f| f.to_string())
            .collect()
    }

    /// Seed a form for one acquisition from its distinct sampled rows.
    pub fn seed<S: AsRef<str>>(
        &self,
        samples: &SampleSet,
        acquisition: &str,
        fields: &[S],
    ) -> Result<AcquisitionForm> {
        if !samples.acquisitions().iter().any(|a| a == acquisition) {
            return Err(AcqSchemaError::UnknownAcquisition(acquisition.to_string()));
        }

        let fields = self.resolve_fields(samples, fields);
        let rows = samples.unique_rows(acquisition, &fields)?;
        debug!(acquisition, fields = fields.len(), rows = rows.len(), "seeding form");

        Ok(seed_form(&rows, &fields))
    }

    /// Seed a form and open an edit session on it.
    pub fn session<S: AsRef<str>>(
        &self,
        samples: &SampleSet,
        acquisition: &str,
        fields: &[S],
    ) -> Result<EditSession> {
        let form = self.seed(samples, acquisition, fields)?;
        Ok(EditSession::new(form).with_history_limit(self.config.history_limit))
    }

    /// Compile a form with the configured compiler.
    pub fn compile(&self, form: &AcquisitionForm) -> Result<CompiledAcquisition> {
        self.compiler.compile(form)
    }

    /// Compile with the built-in compiler and report every degraded value.
    pub fn compile_with_warnings(&self, form: &AcquisitionForm) -> Compilation {
        self.compiler.compile_with_warnings(form)
    }

    /// Compile a form and validate it with the attached service.
    pub fn check(&self, form: &AcquisitionForm) -> Result<ComplianceReport> {
        let service = self
            .service
            .as_ref()
            .ok_or_else(|| AcqSchemaError::Service("no compliance service attached".to_string()))?;
        let acquisition = self.compiler.compile(form)?;
        service.validate(&acquisition)
    }
}

impl Default for AcquisitionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockComplianceService;
    use crate::transform::FormOperation;

    fn samples() -> SampleSet {
        SampleSet::from_json_str(
            r#"[
                {"ProtocolName": "T1", "Manufacturer": "SIEMENS", "EchoTime": 2.3, "RepetitionTime": 2000},
                {"ProtocolName": "T1", "Manufacturer": "SIEMENS", "EchoTime": 2.3, "RepetitionTime": 2000},
                {"ProtocolName": "BOLD", "Manufacturer": "SIEMENS", "EchoTime": 30, "RepetitionTime": 800},
                {"ProtocolName": "BOLD", "Manufacturer": "SIEMENS", "EchoTime": 35, "RepetitionTime": 800}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.acquisition_field, "ProtocolName");
        assert!(!config.strict);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_config_partial_json() {
        let config = BuilderConfig::from_json_str(r#"{"strict": true}"#).unwrap();
        assert!(config.strict);
        assert_eq!(config.acquisition_field, "ProtocolName");
    }

    #[test]
    fn test_config_rejects_zero_history() {
        let err = BuilderConfig::from_json_str(r#"{"history_limit": 0}"#).unwrap_err();
        assert!(matches!(err, AcqSchemaError::Config(_)));
    }

    #[test]
    fn test_seed_partitions_acquisition() {
        let builder = AcquisitionBuilder::new();
        let form = builder
            .seed(&samples(), "BOLD", &["Manufacturer", "EchoTime", "RepetitionTime"])
            .unwrap();

        let constants: Vec<_> = form.constant_fields().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(constants, vec!["Manufacturer", "RepetitionTime"]);
        assert_eq!(form.rows().len(), 2);
        assert_eq!(form.column_names(), vec!["EchoTime"]);
    }

    #[test]
    fn test_seed_defaults_to_known_fields() {
        let builder = AcquisitionBuilder::new();
        let empty: [&str; 0] = [];
        let form = builder.seed(&samples(), "T1", &empty).unwrap();

        // ProtocolName is not in the default list
        assert!(!form.has_field("ProtocolName"));
        assert_eq!(form.constant_fields().len(), 3);
        assert!(form.rows().is_empty());
    }

    #[test]
    fn test_seed_unknown_acquisition() {
        let builder = AcquisitionBuilder::new();
        let err = builder.seed(&samples(), "DWI", &["EchoTime"]).unwrap_err();
        assert!(matches!(err, AcqSchemaError::UnknownAcquisition(_)));
    }

    #[test]
    fn test_session_and_compile() {
        let builder = AcquisitionBuilder::new();
        let mut session = builder.session(&samples(), "BOLD", &["Manufacturer", "EchoTime"]).unwrap();
        session
            .apply(FormOperation::MakeVariable {
                field_id: "Manufacturer".to_string(),
            })
            .unwrap();

        let compiled = builder.compile(session.form()).unwrap();
        assert!(compiled.fields.is_empty());
        assert_eq!(compiled.series.len(), 2);
        assert_eq!(compiled.series[0].fields.len(), 2);
    }

    #[test]
    fn test_strict_config_holds_with_service() {
        let form = AcquisitionForm::new(
            vec![crate::schema::ConstantField::new(
                "ImageComments",
                crate::schema::FieldDatum::exact(crate::schema::DataKind::RawJson, "{a:1"),
            )],
            vec![],
        )
        .unwrap();
        let strict = BuilderConfig {
            strict: true,
            ..BuilderConfig::default()
        };

        let builder = AcquisitionBuilder::with_config(strict).with_service(MockComplianceService::new());
        assert!(matches!(builder.compile(&form), Err(AcqSchemaError::Compile { .. })));
        assert!(matches!(builder.check(&form), Err(AcqSchemaError::Compile { .. })));

        let lenient = AcquisitionBuilder::new().with_service(MockComplianceService::new());
        assert!(lenient.compile(&form).is_ok());
        assert!(lenient.check(&form).is_ok());
    }

    #[test]
    fn test_check_requires_service() {
        let builder = AcquisitionBuilder::new();
        let form = builder.seed(&samples(), "T1", &["EchoTime"]).unwrap();
        assert!(matches!(builder.check(&form), Err(AcqSchemaError::Service(_))));

        let builder = builder.with_service(MockComplianceService::new());
        let report = builder.check(&form).unwrap();
        assert!(report.passed());
        assert_eq!(report.records.len(), 1);
    }
}
