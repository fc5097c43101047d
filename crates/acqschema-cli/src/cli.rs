//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// acqschema: build reference acquisition schemas from sampled metadata
#[derive(Parser)]
#[command(name = "acqschema")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Builder configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the acquisitions and fields found in a sample file
    Inspect {
        /// Path to the samples (JSON/CSV/TSV)
        #[arg(value_name = "SAMPLES")]
        samples: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Seed an acquisition from samples and write its compiled schema
    Template {
        /// Path to the samples (JSON/CSV/TSV)
        #[arg(value_name = "SAMPLES")]
        samples: PathBuf,

        /// Acquisition to build
        #[arg(short, long)]
        acquisition: String,

        /// Comma-separated fields to include (default: standard MR fields)
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Output path for the compiled acquisition (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the editable form snapshot to this path
        #[arg(long, value_name = "FILE")]
        form: Option<PathBuf>,
    },

    /// Compile an edited form snapshot
    Compile {
        /// Path to the form snapshot (JSON)
        #[arg(value_name = "FORM_JSON")]
        form: PathBuf,

        /// Output path for the compiled acquisition (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail on values that cannot be compiled cleanly
        #[arg(long)]
        strict: bool,
    },
}
