//! Canonical row keys and variable-row deduplication.

use std::collections::{BTreeMap, HashSet};

use crate::schema::{FieldDatum, VariableRow};

/// Deterministic key of a row's columns, ignoring the `Series` label.
///
/// Columns are ordered by name and the resulting map is serialized to JSON,
/// so two rows share a key exactly when every column datum is equal.
pub fn canonical_key(row: &VariableRow) -> String {
    let ordered: BTreeMap<&str, &FieldDatum> = row
        .fields()
        .iter()
        .map(|(name, datum)| (name.as_str(), datum))
        .collect();
    // String keys over plain data: serialization cannot fail.
    serde_json::to_string(&ordered).unwrap_or_default()
}

/// Human-readable identity of a row, `name:kind:value:min:max:tolerance`
/// per column sorted by name, joined with `|`.
///
/// Used for matching rows across snapshots; not interchangeable with
/// [`canonical_key`].
pub fn row_unique_key(row: &VariableRow) -> String {
    let mut names: Vec<&String> = row.fields().keys().collect();
    names.sort();

    names
        .into_iter()
        .map(|name| {
            let datum = &row.fields()[name];
            let [min, max, tolerance] = datum.slots();
            format!(
                "{}:{}:{}:{}:{}:{}",
                name,
                datum.constraint(),
                datum.value,
                min,
                max,
                tolerance
            )
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Drop rows whose canonical key was already seen and relabel survivors.
///
/// The first occurrence of each key is kept in original order; survivors are
/// relabelled `"1"`, `"2"`, ... discarding their previous labels.
pub fn deduplicate_rows(rows: &[VariableRow]) -> Vec<VariableRow> {
    let mut seen = HashSet::new();
    let mut unique: Vec<VariableRow> = rows
        .iter()
        .filter(|row| seen.insert(canonical_key(row)))
        .cloned()
        .collect();
    renumber(&mut unique);
    unique
}

/// Relabel rows `"1"`, `"2"`, ... in their current order.
pub(crate) fn renumber(rows: &mut [VariableRow]) {
    for (index, row) in rows.iter_mut().enumerate() {
        row.set_label((index + 1).to_string());
    }
}
