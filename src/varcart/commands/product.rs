//! Product records and their stored variant tables.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VarcartError};
use crate::model::Product;
use crate::selection::SelectionState;
use crate::store::DataStore;
use crate::table::Row;
use crate::variations::to_variations;
use chrono::Utc;
use uuid::Uuid;

pub fn create<S: DataStore>(store: &mut S, title: &str) -> Result<CmdResult> {
    let title = title.trim();
    if title.is_empty() {
        return Err(VarcartError::Api("Title cannot be empty".into()));
    }

    let product = Product::new(title);
    store.save_product(&product)?;
    tracing::info!(product = %product.id, "product created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created product: {} ({})",
        product.title, product.id
    )));
    Ok(result.with_products(vec![product]))
}

pub fn list<S: DataStore>(store: &S) -> Result<CmdResult> {
    let products = store.list_products()?;
    Ok(CmdResult::default().with_products(products))
}

pub fn get<S: DataStore>(store: &S, id: &Uuid) -> Result<CmdResult> {
    let product = store.get_product(id)?;
    Ok(CmdResult::default().with_products(vec![product]))
}

/// Deletes a product together with its stored variations.
pub fn delete<S: DataStore>(store: &mut S, id: &Uuid) -> Result<CmdResult> {
    let product = store.get_product(id)?;
    store.delete_product(id)?;
    tracing::info!(product = %id, "product deleted");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted product: {} ({})",
        product.title, product.id
    )));
    Ok(result.with_products(vec![product]))
}

/// Replaces the product's stored variations with the given table.
pub fn save_table<S: DataStore>(
    store: &mut S,
    id: &Uuid,
    selection: &SelectionState,
    rows: &[Row],
) -> Result<CmdResult> {
    let mut product = store.get_product(id)?;
    product.variations = to_variations(selection, rows);
    product.updated_at = Utc::now();
    store.save_product(&product)?;
    tracing::info!(product = %id, rows = rows.len(), "variant table saved");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} variant(s) for {}",
        rows.len(),
        product.title
    )));
    Ok(result.with_products(vec![product]))
}
