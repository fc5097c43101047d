//! Compilation of form snapshots into the acquisition JSON.

mod compiler;
mod number;
mod payload;

pub use compiler::{
    Compilation, CompileWarning, Compiler, transform_field_datum, transform_value,
};
pub use number::{is_numeric, parse_float};
pub use payload::{
    CompiledAcquisition, CompiledField, CompiledSeries, ConstraintPayload, TypedValue,
};
