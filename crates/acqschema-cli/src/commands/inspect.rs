//! Inspect command - list acquisitions and fields in a sample file.

use std::path::PathBuf;

use acqschema::{AcquisitionBuilder, BuilderConfig};
use colored::Colorize;

pub fn run(
    samples: PathBuf,
    json_output: bool,
    config: BuilderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let builder = AcquisitionBuilder::with_config(config);
    let set = builder.load_samples(&samples)?;

    let acquisitions: Vec<(String, usize)> = set
        .acquisitions()
        .into_iter()
        .map(|name| {
            let records = set.acquisition_rows(&name).count();
            (name, records)
        })
        .collect();
    let columns = set.columns();

    if json_output {
        let report = serde_json::json!({
            "file": samples.display().to_string(),
            "records": set.len(),
            "acquisition_field": set.acquisition_field(),
            "acquisitions": acquisitions
                .iter()
                .map(|(name, records)| serde_json::json!({"name": name, "records": records}))
                .collect::<Vec<_>>(),
            "columns": columns,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} records)",
        "Samples:".cyan().bold(),
        samples.display().to_string().white(),
        set.len()
    );
    println!();

    println!(
        "{} (grouped by {})",
        "Acquisitions:".yellow().bold(),
        set.acquisition_field().cyan()
    );
    if acquisitions.is_empty() {
        println!("  {}", "none found".red());
    }
    for (name, records) in &acquisitions {
        println!("  {:<32} {} records", name.white(), records);
    }
    println!();

    println!("{} {}", "Fields:".yellow().bold(), columns.len());
    for column in &columns {
        println!("  {}", column);
    }

    if let Some((first, _)) = acquisitions.first() {
        println!();
        println!(
            "Run {} to build a schema.",
            format!("acqschema template {} --acquisition {}", samples.display(), first)
                .cyan()
                .bold()
        );
    }

    Ok(())
}
