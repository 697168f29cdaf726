//! # Selection State
//!
//! Which attribute types are chosen for a product, in which order, and which
//! values are chosen for each of them.
//!
//! A [`SelectionState`] is an immutable snapshot. The `with_*` methods return a
//! new snapshot and leave `self` untouched, so an editing session can swap its
//! state wholesale after every change.
//!
//! ## Invariants
//!
//! - Selected types are duplicate-free. Their order is the combination order
//!   and the column order of the table.
//! - Every value-mapping key is a selected type. Deselecting a type drops its
//!   values with it, so no orphan entries can exist.
//! - Value lists are duplicate-free and keep the order they were chosen in.
//!
//! Catalog validation (does the type exist, is the value active) is not done
//! here; see `commands::select`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, VarcartError};

fn dedup_ordered<I, T>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.into();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    types: Vec<String>,
    values: BTreeMap<String, Vec<String>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from raw parts, dropping duplicates and orphaned value entries.
    pub fn from_parts<I, T>(types: I, values: BTreeMap<String, Vec<String>>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let types = dedup_ordered(types);
        let values = values
            .into_iter()
            .filter(|(t, _)| types.contains(t))
            .map(|(t, v)| (t, dedup_ordered(v)))
            .collect();
        Self { types, values }
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn is_selected(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    /// Chosen values of `type_name`; empty when none were chosen yet.
    pub fn values(&self, type_name: &str) -> &[String] {
        self.values
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when at least one selected type has a value entry.
    pub fn has_value_entries(&self) -> bool {
        !self.values.is_empty()
    }

    /// Every selected type, in selection order, with its chosen values.
    ///
    /// Types without an entry yield an empty slice, which the generator treats
    /// as an empty factor.
    pub fn factors(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.types.iter().map(|t| (t.as_str(), self.values(t)))
    }

    /// Replaces the selected types. Value entries of types that stay selected
    /// are kept; the rest are dropped.
    pub fn with_types<I, T>(&self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let types = dedup_ordered(types);
        let values = self
            .values
            .iter()
            .filter(|(t, _)| types.contains(t))
            .map(|(t, v)| (t.clone(), v.clone()))
            .collect();
        Self { types, values }
    }

    /// Replaces the chosen values of one selected type.
    pub fn with_values<I, T>(&self, type_name: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if !self.is_selected(type_name) {
            return Err(VarcartError::TypeNotSelected(type_name.to_string()));
        }
        let mut next = self.clone();
        next.values
            .insert(type_name.to_string(), dedup_ordered(values));
        Ok(next)
    }

    /// Keeps only the types and values accepted by the predicates.
    pub fn retain<FT, FV>(&self, keep_type: FT, keep_value: FV) -> Self
    where
        FT: Fn(&str) -> bool,
        FV: Fn(&str, &str) -> bool,
    {
        let types: Vec<String> = self
            .types
            .iter()
            .filter(|t| keep_type(t))
            .cloned()
            .collect();
        let values = self
            .values
            .iter()
            .filter(|(t, _)| types.contains(t))
            .map(|(t, vs)| {
                let kept = vs.iter().filter(|v| keep_value(t, v)).cloned().collect();
                (t.clone(), kept)
            })
            .collect();
        Self { types, values }
    }
}
