//! Field constraint model: kinds, field data and the acquisition form.

mod datum;
mod form;
mod types;

pub use datum::FieldDatum;
pub use form::{AcquisitionForm, ConstantField, SERIES_FIELD, VariableRow};
pub use types::{ConstraintKind, DataKind, ListElementKind, allowed_constraint_kinds};
