//! CLI command implementations.

pub mod compile;
pub mod inspect;
pub mod template;

use std::fs;
use std::path::Path;

use acqschema::{AcquisitionBuilder, AcquisitionForm, CompiledAcquisition};
use colored::Colorize;

/// Write pretty JSON to `output`, or to stdout when no path is given.
pub(crate) fn write_json(
    value: &serde_json::Value,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(path, rendered + "\n")?,
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Compile once. Lenient builders print their warnings; strict builders
/// fail on the first one.
pub(crate) fn compile_form(
    builder: &AcquisitionBuilder,
    form: &AcquisitionForm,
) -> Result<CompiledAcquisition, Box<dyn std::error::Error>> {
    if builder.config().strict {
        return Ok(builder.compile(form)?);
    }

    let compilation = builder.compile_with_warnings(form);
    for warning in &compilation.warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), warning);
    }
    Ok(compilation.acquisition)
}

/// One-line summary of a compiled acquisition.
pub(crate) fn describe(acquisition: &CompiledAcquisition) -> String {
    format!(
        "{} constant fields, {} series",
        acquisition.fields.len(),
        acquisition.series.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acquisition.json");

        write_json(&serde_json::json!({"fields": [], "series": []}), Some(path.as_path())).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["series"], serde_json::json!([]));
    }

    fn form_with_bad_json() -> AcquisitionForm {
        AcquisitionForm::new(
            vec![acqschema::ConstantField::new(
                "ImageComments",
                acqschema::FieldDatum::exact(acqschema::DataKind::RawJson, "{a:1"),
            )],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_compile_form_lenient_passes_text_through() {
        let builder = AcquisitionBuilder::new();
        let compiled = compile_form(&builder, &form_with_bad_json()).unwrap();
        assert_eq!(
            compiled.to_json()["fields"][0],
            serde_json::json!({"field": "ImageComments", "value": "{a:1"})
        );
    }

    #[test]
    fn test_compile_form_strict_fails() {
        let builder = AcquisitionBuilder::with_config(acqschema::BuilderConfig {
            strict: true,
            ..Default::default()
        });
        assert!(compile_form(&builder, &form_with_bad_json()).is_err());
    }

    #[test]
    fn test_describe_counts() {
        let acquisition = CompiledAcquisition::default();
        assert_eq!(describe(&acquisition), "0 constant fields, 0 series");
    }
}
