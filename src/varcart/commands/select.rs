//! Selection changes and the regeneration they trigger.
//!
//! Every function validates the requested selection against the catalog,
//! builds the next [`SelectionState`] and, when needed, regenerates the table
//! via [`generate`] and [`reconcile`]. Inputs are borrowed and left untouched;
//! the caller swaps in the returned [`TableUpdate`].
//!
//! ## Catalog rules
//!
//! - Unknown types and values are rejected.
//! - Inactive types and values cannot be newly selected.
//! - Anything already in the selection is accepted as-is, even if it has since
//!   been deactivated or removed from the catalog. Pruning those is a separate,
//!   explicit step ([`prune_inactive`]).

use super::{generate, reconcile, TableChange, TableUpdate};
use crate::error::{Result, VarcartError};
use crate::model::Catalog;
use crate::selection::SelectionState;
use crate::table::Row;

/// Regenerates the table for `selection`, carrying inventory over from `previous`.
pub fn regenerate(selection: &SelectionState, previous: &[Row]) -> Vec<Row> {
    reconcile::run(&generate::from_selection(selection), previous)
}

/// Replaces the selected types.
///
/// Reordering alone counts as a change, since it reorders rows and columns.
pub fn types<I, T>(
    catalog: &Catalog,
    selection: &SelectionState,
    rows: &[Row],
    types: I,
) -> Result<TableUpdate>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let next = selection.with_types(types);

    for type_name in next.types() {
        if selection.is_selected(type_name) {
            continue;
        }
        match catalog.find_type(type_name) {
            None => return Err(VarcartError::UnknownAttributeType(type_name.clone())),
            Some(t) if !t.active => {
                return Err(VarcartError::InactiveAttribute(type_name.clone()))
            }
            Some(_) => {}
        }
    }

    if next.types() == selection.types() {
        return Ok(TableUpdate::unchanged(selection, rows));
    }

    if !next.has_value_entries() {
        tracing::debug!("no value entries left, clearing table");
        return Ok(TableUpdate {
            selection: next,
            rows: Vec::new(),
            change: TableChange::Cleared,
        });
    }

    let rows = regenerate(&next, rows);
    Ok(TableUpdate {
        selection: next,
        rows,
        change: TableChange::Regenerated,
    })
}

/// Replaces the chosen values of one selected type. Always regenerates.
pub fn values<I, T>(
    catalog: &Catalog,
    selection: &SelectionState,
    rows: &[Row],
    type_name: &str,
    values: I,
) -> Result<TableUpdate>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let next = selection.with_values(type_name, values)?;
    let current = selection.values(type_name);

    for value in next.values(type_name) {
        if current.contains(value) {
            continue;
        }
        match catalog.find_value(type_name, value) {
            None => {
                return Err(VarcartError::UnknownAttributeValue {
                    type_name: type_name.to_string(),
                    value: value.clone(),
                })
            }
            Some(v) if !v.active => {
                return Err(VarcartError::InactiveAttribute(format!(
                    "{type_name}/{value}"
                )))
            }
            Some(_) => {}
        }
    }

    let rows = regenerate(&next, rows);
    Ok(TableUpdate {
        selection: next,
        rows,
        change: TableChange::Regenerated,
    })
}

/// Removes inactive or unknown types and values from the selection.
pub fn prune_inactive(catalog: &Catalog, selection: &SelectionState, rows: &[Row]) -> TableUpdate {
    let next = selection.retain(
        |t| catalog.find_type(t).is_some_and(|t| t.active),
        |t, v| catalog.is_selectable_value(t, v),
    );

    if next == *selection {
        return TableUpdate::unchanged(selection, rows);
    }
    tracing::warn!(
        before = selection.types().len(),
        after = next.types().len(),
        "pruned inactive attributes from selection"
    );

    if !next.has_value_entries() {
        return TableUpdate {
            selection: next,
            rows: Vec::new(),
            change: TableChange::Cleared,
        };
    }
    let rows = regenerate(&next, rows);
    TableUpdate {
        selection: next,
        rows,
        change: TableChange::Regenerated,
    }
}
