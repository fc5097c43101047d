//! Form transitions: deduplication, promotion operations and edit sessions.

mod dedup;
mod edits;
mod engine;
mod operations;
mod promotion;
mod session;

pub use dedup::{canonical_key, deduplicate_rows, row_unique_key};
pub use edits::{add_constant, delete_constant, update_cell, update_constant};
pub use engine::{TransformEngine, Transition};
pub use operations::{FormChange, FormOperation};
pub use promotion::{
    add_series, delete_series, delete_variable_column, make_constant, make_variable,
};
pub use session::{DEFAULT_HISTORY_LIMIT, EditSession};
