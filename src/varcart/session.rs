//! # Editing Session
//!
//! An [`EditSession`] owns the editing state of one product's variant table:
//! the current [`SelectionState`], the row table, and the catalog the
//! selection is validated against.
//!
//! ## Lifecycle
//!
//! ```text
//! open ──► Loading ──load_catalog(Ok)──► Ready ──► ... ──► close
//!             │                            ▲
//!             └──load_catalog(Err)──► Failed ┘ (retry)
//! ```
//!
//! The stored table is available as soon as the session opens, and field edits
//! work right away. Selection changes need the catalog and are refused with
//! `CatalogUnavailable` until it is `Ready`. After [`EditSession::close`] every
//! operation returns `SessionClosed`.
//!
//! Each operation swaps the selection and rows wholesale with the snapshots
//! returned by `commands::select` and `commands::edit`.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::commands::{edit, select, TableChange, TableUpdate};
use crate::config::InactivePolicy;
use crate::error::{Result, VarcartError};
use crate::model::{Catalog, Product};
use crate::selection::SelectionState;
use crate::table::{Row, RowField};
use crate::variations::{from_variations, to_variations, VariantGroup};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Ready(Catalog),
    Failed(String),
}

/// What a UI may offer for selection.
///
/// Active catalog entries in catalog order, followed by entries that are
/// already selected but no longer selectable, so they stay visible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionOptions {
    pub types: Vec<String>,
    pub values: BTreeMap<String, Vec<String>>,
}

fn merge_retained(offered: Vec<&str>, selected: &[String]) -> Vec<String> {
    let mut out: Vec<String> = offered.into_iter().map(str::to_string).collect();
    for name in selected {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

#[derive(Debug)]
pub struct EditSession {
    product_id: Uuid,
    catalog: CatalogState,
    selection: SelectionState,
    rows: Vec<Row>,
    policy: InactivePolicy,
    closed: bool,
}

impl EditSession {
    /// Opens a session on the stored table of `product`. The catalog starts out
    /// `Loading`.
    pub fn open(product: &Product, policy: InactivePolicy) -> Self {
        let loaded = from_variations(&product.variations);
        tracing::debug!(
            product = %product.id,
            rows = loaded.rows.len(),
            types = loaded.selection.types().len(),
            "session opened"
        );
        Self {
            product_id: product.id,
            catalog: CatalogState::Loading,
            selection: loaded.selection,
            rows: loaded.rows,
            policy,
            closed: false,
        }
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Installs the outcome of a catalog fetch.
    ///
    /// A failure leaves the session `Failed` and is returned as
    /// `CatalogUnavailable`; calling again with a good catalog recovers. With
    /// [`InactivePolicy::Drop`], inactive entries are pruned from the selection
    /// once the catalog is in.
    pub fn load_catalog(&mut self, fetched: Result<Catalog>) -> Result<TableChange> {
        self.ensure_open()?;
        let catalog = match fetched {
            Ok(catalog) => catalog,
            Err(err) => {
                let reason = err.to_string();
                tracing::warn!(product = %self.product_id, %reason, "catalog load failed");
                self.catalog = CatalogState::Failed(reason.clone());
                return Err(VarcartError::CatalogUnavailable(reason));
            }
        };

        let change = match self.policy {
            InactivePolicy::Keep => TableChange::Unchanged,
            InactivePolicy::Drop => {
                let update = select::prune_inactive(&catalog, &self.selection, &self.rows);
                self.apply(update)
            }
        };
        self.catalog = CatalogState::Ready(catalog);
        Ok(change)
    }

    pub fn select_types<I, T>(&mut self, types: I) -> Result<TableChange>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let update = select::types(self.catalog()?, &self.selection, &self.rows, types)?;
        Ok(self.apply(update))
    }

    pub fn select_values<I, T>(&mut self, type_name: &str, values: I) -> Result<TableChange>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let update = select::values(
            self.catalog()?,
            &self.selection,
            &self.rows,
            type_name,
            values,
        )?;
        Ok(self.apply(update))
    }

    pub fn set_field(&mut self, key: usize, field: RowField, value: f64) -> Result<()> {
        self.ensure_open()?;
        self.rows = edit::set_field(&self.rows, key, field, value)?;
        Ok(())
    }

    pub fn set_field_input(&mut self, key: usize, field: RowField, input: &str) -> Result<()> {
        self.ensure_open()?;
        self.rows = edit::set_field_input(&self.rows, key, field, input)?;
        Ok(())
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Table columns: one per selected type in selection order, then `price`
    /// and `stock`.
    pub fn columns(&self) -> Vec<String> {
        self.selection
            .types()
            .iter()
            .cloned()
            .chain([RowField::Price.to_string(), RowField::Stock.to_string()])
            .collect()
    }

    pub fn options(&self) -> Result<SelectionOptions> {
        let catalog = self.catalog()?;
        let types = merge_retained(catalog.selectable_types(), self.selection.types());
        let values = self
            .selection
            .types()
            .iter()
            .map(|t| {
                let offered = merge_retained(catalog.selectable_values(t), self.selection.values(t));
                (t.clone(), offered)
            })
            .collect();
        Ok(SelectionOptions { types, values })
    }

    pub fn to_variations(&self) -> Vec<VariantGroup> {
        to_variations(&self.selection, &self.rows)
    }

    pub fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.closed = true;
        tracing::debug!(product = %self.product_id, "session closed");
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(VarcartError::SessionClosed);
        }
        Ok(())
    }

    fn catalog(&self) -> Result<&Catalog> {
        self.ensure_open()?;
        match &self.catalog {
            CatalogState::Ready(catalog) => Ok(catalog),
            CatalogState::Loading => Err(VarcartError::CatalogUnavailable(
                "catalog is still loading".into(),
            )),
            CatalogState::Failed(reason) => Err(VarcartError::CatalogUnavailable(reason.clone())),
        }
    }

    fn apply(&mut self, update: TableUpdate) -> TableChange {
        if update.change != TableChange::Unchanged {
            tracing::debug!(
                change = ?update.change,
                rows = update.rows.len(),
                "table updated"
            );
        }
        self.selection = update.selection;
        self.rows = update.rows;
        update.change
    }
}
