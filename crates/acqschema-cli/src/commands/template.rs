//! Template command - seed an acquisition from samples and compile it.

use std::fs;
use std::path::PathBuf;

use acqschema::{AcquisitionBuilder, BuilderConfig};
use colored::Colorize;

use super::{compile_form, describe, write_json};

pub fn run(
    samples: PathBuf,
    acquisition: String,
    fields: Vec<String>,
    output: Option<PathBuf>,
    form_output: Option<PathBuf>,
    config: BuilderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = AcquisitionBuilder::with_config(config);
    let set = builder.load_samples(&samples)?;

    let selected = builder.resolve_fields(&set, &fields);
    if selected.is_empty() {
        eprintln!(
            "{} no fields selected and none of the default fields are present",
            "Warning:".yellow().bold()
        );
    }

    let form = builder.seed(&set, &acquisition, &selected)?;
    if let Some(path) = &form_output {
        fs::write(path, serde_json::to_string_pretty(&form)? + "\n")?;
        eprintln!("{} {}", "Form written to".green(), path.display());
    }

    let compiled = compile_form(&builder, &form)?;
    write_json(&compiled.to_json(), output.as_deref())?;

    eprintln!(
        "{} {}: {}",
        "Built".green().bold(),
        acquisition.white(),
        describe(&compiled)
    );
    if let Some(path) = &output {
        eprintln!("{} {}", "Written to".green(), path.display());
    }

    Ok(())
}
