//! Inference from sampled data: partition, data kinds and form seeding.

mod kind;
mod partition;
mod seed;

pub use kind::{datum_from_sample, display_value, infer_data_kind};
pub use partition::{Partition, compute_constant_fields};
pub use seed::seed_form;
