//! # Command Layer
//!
//! The business logic of varcart. Each command lives in its own submodule as
//! plain functions over domain types.
//!
//! Two families live here:
//!
//! - **Engine** commands ([`generate`], [`reconcile`], [`select`], [`edit`]) are
//!   pure: they borrow snapshots and return new ones. They never touch a store
//!   and never mutate their inputs.
//! - **Store** commands ([`catalog`], [`product`], [`config`]) read and write
//!   through a [`crate::store::DataStore`] and return a [`CmdResult`].
//!
//! Neither family does any terminal I/O. Messages come back as structured
//! [`CmdMessage`]s and the UI decides how to show them.
//!
//! ## Testing Strategy
//!
//! Most tests live here. Store commands run against `InMemoryStore`;
//! engine commands need no store at all.

use crate::config::VarcartConfig;
use crate::model::{Catalog, Product};
use crate::selection::SelectionState;
use crate::table::Row;
use serde::Serialize;

pub mod catalog;
pub mod config;
pub mod edit;
pub mod generate;
pub mod product;
pub mod reconcile;
pub mod select;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub catalog: Option<Catalog>,
    pub products: Vec<Product>,
    pub config: Option<VarcartConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.products = products;
        self
    }

    pub fn with_config(mut self, config: VarcartConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// How a selection change affected the row table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableChange {
    /// Nothing changed; selection and rows are the previous snapshots.
    Unchanged,
    /// No value entries remain, the table was emptied without regenerating.
    Cleared,
    /// Combinations were regenerated and reconciled against the old rows.
    Regenerated,
}

/// Result of an engine command: the snapshots that replace the old ones.
#[derive(Debug, Clone)]
pub struct TableUpdate {
    pub selection: SelectionState,
    pub rows: Vec<Row>,
    pub change: TableChange,
}

impl TableUpdate {
    pub(crate) fn unchanged(selection: &SelectionState, rows: &[Row]) -> Self {
        Self {
            selection: selection.clone(),
            rows: rows.to_vec(),
            change: TableChange::Unchanged,
        }
    }
}
