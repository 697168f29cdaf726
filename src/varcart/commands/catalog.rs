//! Catalog management: listing, searching and editing attribute types and values.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VarcartError};
use crate::model::{status_label, AttributeType, AttributeValue, Catalog};
use crate::store::DataStore;
use crate::table::is_reserved_column;
use chrono::{DateTime, Utc};

fn entry_matches(query: &str, name: &str, parent: &str, active: bool, updated_at: DateTime<Utc>) -> bool {
    name.to_lowercase().contains(query)
        || parent.to_lowercase().contains(query)
        || status_label(active).contains(query)
        || updated_at.format("%Y-%m-%d").to_string().contains(query)
}

/// Lists the catalog. A non-empty `query` keeps entries whose name, parent,
/// status word or update date contains it (case-insensitive).
pub fn list<S: DataStore>(store: &S, query: Option<&str>) -> Result<CmdResult> {
    let catalog = store.load_catalog()?;
    let query = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    if query.is_empty() {
        return Ok(CmdResult::default().with_catalog(catalog));
    }

    let filtered = Catalog {
        types: catalog
            .types
            .into_iter()
            .filter(|t| entry_matches(&query, &t.name, "", t.active, t.updated_at))
            .collect(),
        values: catalog
            .values
            .into_iter()
            .filter(|v| entry_matches(&query, &v.name, &v.parent, v.active, v.updated_at))
            .collect(),
    };
    Ok(CmdResult::default().with_catalog(filtered))
}

pub fn add_type<S: DataStore>(store: &mut S, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(VarcartError::Api("Attribute type name cannot be empty".into()));
    }
    if is_reserved_column(name) {
        return Err(VarcartError::ReservedAttributeName(name.to_string()));
    }

    let mut catalog = store.load_catalog()?;
    if catalog
        .types
        .iter()
        .any(|t| t.name.eq_ignore_ascii_case(name))
    {
        return Err(VarcartError::DuplicateAttribute(name.to_string()));
    }
    catalog.types.push(AttributeType::new(name));
    store.save_catalog(&catalog)?;
    tracing::info!(attribute_type = name, "attribute type added");

    let mut result = CmdResult::default().with_catalog(catalog);
    result.add_message(CmdMessage::success(format!("Attribute type added: {name}")));
    Ok(result)
}

/// Adds a value under `type_name`. A blank name falls back to the color code.
pub fn add_value<S: DataStore>(
    store: &mut S,
    type_name: &str,
    name: Option<&str>,
    color_code: Option<&str>,
) -> Result<CmdResult> {
    let color_code = color_code.map(str::trim).filter(|c| !c.is_empty());
    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .or(color_code)
        .ok_or_else(|| VarcartError::Api("Attribute value name cannot be empty".into()))?;

    let mut catalog = store.load_catalog()?;
    if catalog.find_type(type_name).is_none() {
        return Err(VarcartError::UnknownAttributeType(type_name.to_string()));
    }
    if catalog
        .values_of(type_name)
        .any(|v| v.name.eq_ignore_ascii_case(name))
    {
        return Err(VarcartError::DuplicateAttribute(format!("{type_name}/{name}")));
    }

    let mut value = AttributeValue::new(type_name, name);
    if let Some(code) = color_code {
        value = value.with_color_code(code);
    }
    catalog.values.push(value);
    store.save_catalog(&catalog)?;
    tracing::info!(attribute_type = type_name, value = name, "attribute value added");

    let mut result = CmdResult::default().with_catalog(catalog);
    result.add_message(CmdMessage::success(format!(
        "Attribute value added: {type_name}/{name}"
    )));
    Ok(result)
}

/// Activates or deactivates a type, or one of its values when `value` is given.
pub fn set_active<S: DataStore>(
    store: &mut S,
    type_name: &str,
    value: Option<&str>,
    active: bool,
) -> Result<CmdResult> {
    let mut catalog = store.load_catalog()?;
    let now = Utc::now();
    let label = match value {
        Some(value_name) => {
            let entry = catalog.find_value_mut(type_name, value_name).ok_or_else(|| {
                VarcartError::UnknownAttributeValue {
                    type_name: type_name.to_string(),
                    value: value_name.to_string(),
                }
            })?;
            entry.active = active;
            entry.updated_at = now;
            format!("{type_name}/{value_name}")
        }
        None => {
            let entry = catalog
                .find_type_mut(type_name)
                .ok_or_else(|| VarcartError::UnknownAttributeType(type_name.to_string()))?;
            entry.active = active;
            entry.updated_at = now;
            type_name.to_string()
        }
    };
    store.save_catalog(&catalog)?;
    tracing::info!(entry = %label, active, "catalog entry status changed");

    let verb = if active { "enabled" } else { "disabled" };
    let mut result = CmdResult::default().with_catalog(catalog);
    result.add_message(CmdMessage::success(format!("{label} {verb}")));
    Ok(result)
}

/// Removes a value, or a whole type together with its values.
pub fn remove<S: DataStore>(store: &mut S, type_name: &str, value: Option<&str>) -> Result<CmdResult> {
    let mut catalog = store.load_catalog()?;
    let label = match value {
        Some(value_name) => {
            if catalog.find_value(type_name, value_name).is_none() {
                return Err(VarcartError::UnknownAttributeValue {
                    type_name: type_name.to_string(),
                    value: value_name.to_string(),
                });
            }
            catalog
                .values
                .retain(|v| !(v.parent == type_name && v.name == value_name));
            format!("{type_name}/{value_name}")
        }
        None => {
            if catalog.find_type(type_name).is_none() {
                return Err(VarcartError::UnknownAttributeType(type_name.to_string()));
            }
            catalog.types.retain(|t| t.name != type_name);
            catalog.values.retain(|v| v.parent != type_name);
            type_name.to_string()
        }
    };
    store.save_catalog(&catalog)?;
    tracing::info!(entry = %label, "catalog entry removed");

    let mut result = CmdResult::default().with_catalog(catalog);
    result.add_message(CmdMessage::success(format!("Removed {label}")));
    Ok(result)
}
