//! Persisted product variations and their mapping to the editing table.
//!
//! Products store their variant table as a list holding one variant group:
//!
//! ```json
//! "variations": [{
//!   "variants": [
//!     {"data": [{"label": "Size", "value": "S"}, {"label": "Color", "value": "Red"}],
//!      "price": 12.5, "stock": 7}
//!   ]
//! }]
//! ```
//!
//! Only the first group is read back. Saving always emits exactly one group.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::selection::SelectionState;
use crate::table::{coerce_number, sanitize_number, Combination, Row};

/// Stored numbers are read leniently, the way typed input is: numeric text is
/// parsed, and anything negative, non-finite or non-numeric becomes 0.
fn lenient_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(sanitize_number).unwrap_or(0.0),
        Value::String(s) => coerce_number(s),
        _ => 0.0,
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(lenient_number(&Value::deserialize(deserializer)?))
}

fn lenient_stock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(lenient_number(&Value::deserialize(deserializer)?).trunc() as u64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDatum {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default)]
    pub data: Vec<VariantDatum>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_stock")]
    pub stock: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantGroup {
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// Selection and rows rebuilt from stored variations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedTable {
    pub selection: SelectionState,
    pub rows: Vec<Row>,
}

/// Rebuilds the editing state of a stored product.
///
/// Selected types are the distinct labels in first-seen order. Each type's
/// selected values are its distinct values in first-seen order. Rows are taken
/// verbatim (no regeneration), keyed `1..=N`.
pub fn from_variations(groups: &[VariantGroup]) -> LoadedTable {
    let Some(group) = groups.first() else {
        return LoadedTable::default();
    };

    let mut types: Vec<String> = Vec::new();
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut rows = Vec::with_capacity(group.variants.len());

    for (i, variant) in group.variants.iter().enumerate() {
        let mut attributes = Combination::new();
        for datum in &variant.data {
            if !types.contains(&datum.label) {
                types.push(datum.label.clone());
            }
            let seen = values.entry(datum.label.clone()).or_default();
            if !seen.contains(&datum.value) {
                seen.push(datum.value.clone());
            }
            attributes.insert(datum.label.as_str(), datum.value.as_str());
        }
        rows.push(Row::new(i + 1, attributes).with_inventory(variant.price, variant.stock));
    }

    LoadedTable {
        selection: SelectionState::from_parts(types, values),
        rows,
    }
}

/// Emits the table as the single stored variant group.
///
/// Each row lists one datum per selected type, in selection order. A type the
/// row does not carry is skipped rather than written empty.
pub fn to_variations(selection: &SelectionState, rows: &[Row]) -> Vec<VariantGroup> {
    let variants = rows
        .iter()
        .map(|row| Variant {
            data: selection
                .types()
                .iter()
                .filter_map(|t| {
                    row.get(t).map(|v| VariantDatum {
                        label: t.clone(),
                        value: v.to_string(),
                    })
                })
                .collect(),
            price: row.price,
            stock: row.stock,
        })
        .collect();
    vec![VariantGroup { variants }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Vec<VariantGroup> {
        let json = r#"[{"variants": [
            {"data": [{"label": "Size", "value": "S"}, {"label": "Color", "value": "Red"}], "price": 10, "stock": 2},
            {"data": [{"label": "Size", "value": "S"}, {"label": "Color", "value": "Blue"}], "price": 11.5, "stock": 0},
            {"data": [{"label": "Size", "value": "M"}, {"label": "Color", "value": "Red"}], "price": 12, "stock": 15}
        ]}]"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn load_reconstructs_selection_in_first_seen_order() {
        let loaded = from_variations(&stored());
        assert_eq!(loaded.selection.types(), ["Size", "Color"]);
        assert_eq!(loaded.selection.values("Size"), ["S", "M"]);
        assert_eq!(loaded.selection.values("Color"), ["Red", "Blue"]);
    }

    #[test]
    fn load_keeps_rows_verbatim() {
        let loaded = from_variations(&stored());
        assert_eq!(loaded.rows.len(), 3);
        assert_eq!(loaded.rows[2].key, 3);
        assert_eq!(loaded.rows[2].get("Size"), Some("M"));
        assert_eq!(loaded.rows[2].stock, 15);
        assert_eq!(loaded.rows[1].price, 11.5);
    }

    #[test]
    fn load_of_nothing_is_empty() {
        assert_eq!(from_variations(&[]), LoadedTable::default());
        let empty_group = vec![VariantGroup::default()];
        let loaded = from_variations(&empty_group);
        assert!(loaded.rows.is_empty());
        assert!(loaded.selection.types().is_empty());
    }

    #[test]
    fn save_emits_one_group_in_selection_order() {
        let loaded = from_variations(&stored());
        let selection = loaded.selection.with_types(["Color", "Size"]);
        let groups = to_variations(&selection, &loaded.rows);
        assert_eq!(groups.len(), 1);
        let first = &groups[0].variants[0];
        assert_eq!(first.data[0].label, "Color");
        assert_eq!(first.data[1].label, "Size");
        assert_eq!(first.price, 10.0);
    }

    #[test]
    fn save_skips_missing_labels() {
        let selection = SelectionState::new().with_types(["Size", "Color"]);
        let rows = vec![Row::new(1, Combination::from_pairs([("Size", "S")]))];
        let groups = to_variations(&selection, &rows);
        assert_eq!(groups[0].variants[0].data.len(), 1);
    }

    #[test]
    fn load_coerces_loose_stored_numbers() {
        let json = r#"[{"variants": [
            {"data": [{"label": "Size", "value": "S"}], "price": -3, "stock": 2.7},
            {"data": [{"label": "Size", "value": "M"}], "price": "8.5", "stock": -1},
            {"data": [{"label": "Size", "value": "L"}], "price": null, "stock": "abc"},
            {"data": [{"label": "Size", "value": "XL"}]}
        ]}]"#;
        let groups: Vec<VariantGroup> = serde_json::from_str(json).unwrap();
        let loaded = from_variations(&groups);
        let inventory: Vec<(f64, u64)> = loaded.rows.iter().map(|r| (r.price, r.stock)).collect();
        assert_eq!(inventory, vec![(0.0, 2), (8.5, 0), (0.0, 0), (0.0, 0)]);
    }

    #[test]
    fn save_then_load_preserves_table() {
        let loaded = from_variations(&stored());
        let reloaded = from_variations(&to_variations(&loaded.selection, &loaded.rows));
        assert_eq!(loaded, reloaded);
    }
}
