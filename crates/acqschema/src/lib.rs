//! acqschema: field constraint model and acquisition builder for MR
//! imaging protocols.
//!
//! A reference acquisition is described as a form: constant fields that hold
//! a single value across every series, and a table of series rows for the
//! fields that vary. Each cell is a [`FieldDatum`] pairing a constraint kind
//! (exact value, range, value with tolerance, substring) with a data kind.
//!
//! # Core Principles
//!
//! - **Seeded from data**: the initial form is partitioned from sampled
//!   metadata records
//! - **Immutable snapshots**: every edit is a pure transition to a new form
//! - **Typed output**: the compiler turns edited strings into the payload a
//!   compliance engine consumes
//!
//! # Example
//!
//! ```no_run
//! use acqschema::AcquisitionBuilder;
//!
//! let builder = AcquisitionBuilder::new();
//! let samples = builder.load_samples("session.json").unwrap();
//! let form = builder.seed(&samples, "T1w_MPR", &["EchoTime", "RepetitionTime"]).unwrap();
//! let compiled = builder.compile(&form).unwrap();
//!
//! println!("{}", compiled.to_json());
//! ```

pub mod compile;
pub mod error;
pub mod inference;
pub mod input;
pub mod schema;
pub mod service;
pub mod transform;
pub mod validation;

mod builder;

pub use crate::builder::{AcquisitionBuilder, BuilderConfig};
pub use compile::{CompiledAcquisition, Compiler};
pub use error::{AcqSchemaError, Result};
pub use input::{SampleRow, SampleSet};
pub use schema::{AcquisitionForm, ConstantField, ConstraintKind, DataKind, FieldDatum, VariableRow};
pub use transform::{EditSession, FormChange, FormOperation};
