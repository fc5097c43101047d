//! Compile command - turn an edited form snapshot into an acquisition.

use std::fs;
use std::path::PathBuf;

use acqschema::{AcquisitionBuilder, AcquisitionForm, BuilderConfig};
use colored::Colorize;

use super::{compile_form, describe, write_json};

pub fn run(
    form_path: PathBuf,
    output: Option<PathBuf>,
    strict: bool,
    mut config: BuilderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(&form_path)
        .map_err(|e| format!("Cannot read form {}: {}", form_path.display(), e))?;
    let form: AcquisitionForm = serde_json::from_str(&contents)?;

    config.strict |= strict;
    let builder = AcquisitionBuilder::with_config(config);

    let compiled = compile_form(&builder, &form)?;
    write_json(&compiled.to_json(), output.as_deref())?;

    eprintln!("{} {}", "Compiled".green().bold(), describe(&compiled));
    Ok(())
}
