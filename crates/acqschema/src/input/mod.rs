//! Input handling: sampled metadata records.

mod fields;
mod loader;
mod samples;

pub use fields::DEFAULT_DICOM_FIELDS;
pub use samples::{DEFAULT_ACQUISITION_FIELD, SampleRow, SampleSet};
