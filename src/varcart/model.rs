//! Attribute catalog types.
//!
//! The catalog holds two kinds of records: attribute **types** (e.g. `Size`,
//! `Color`) and the **values** each type permits (e.g. `S`, `M`, `Red`). Values
//! point at their owning type by name through `parent`.
//!
//! The engine only reads the catalog. Option lists shown to a user are built
//! from active entries, see [`Catalog::selectable_types`] and
//! [`Catalog::selectable_values`].
//!
//! [`Product`] is the persisted record a variant table belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::variations::VariantGroup;

fn default_true() -> bool {
    true
}

/// The word used for an entry's status, both for display and catalog search.
pub fn status_label(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "inactive"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeType {
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl AttributeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub name: String,
    /// Name of the owning [`AttributeType`].
    pub parent: String,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Free-text swatch code, only meaningful for color-like types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl AttributeValue {
    pub fn new(parent: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: parent.into(),
            active: true,
            color_code: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_color_code(mut self, code: impl Into<String>) -> Self {
        self.color_code = Some(code.into());
        self
    }
}

/// The full set of known attribute types and values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub types: Vec<AttributeType>,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used by fixtures: adds an active type.
    pub fn with_type(mut self, name: &str) -> Self {
        self.types.push(AttributeType::new(name));
        self
    }

    /// Builder used by fixtures: adds active values under `parent`.
    pub fn with_values(mut self, parent: &str, names: &[&str]) -> Self {
        for name in names {
            self.values.push(AttributeValue::new(parent, *name));
        }
        self
    }

    pub fn find_type(&self, name: &str) -> Option<&AttributeType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn find_type_mut(&mut self, name: &str) -> Option<&mut AttributeType> {
        self.types.iter_mut().find(|t| t.name == name)
    }

    pub fn find_value(&self, parent: &str, name: &str) -> Option<&AttributeValue> {
        self.values
            .iter()
            .find(|v| v.parent == parent && v.name == name)
    }

    pub fn find_value_mut(&mut self, parent: &str, name: &str) -> Option<&mut AttributeValue> {
        self.values
            .iter_mut()
            .find(|v| v.parent == parent && v.name == name)
    }

    /// All values owned by `parent`, in catalog order.
    pub fn values_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a AttributeValue> {
        self.values.iter().filter(move |v| v.parent == parent)
    }

    /// Names of active types, in catalog order.
    pub fn selectable_types(&self) -> Vec<&str> {
        self.types
            .iter()
            .filter(|t| t.active)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Names of active values of `parent`. Empty when the type itself is inactive.
    pub fn selectable_values<'a>(&'a self, parent: &'a str) -> Vec<&'a str> {
        match self.find_type(parent) {
            Some(t) if t.active => self
                .values_of(parent)
                .filter(|v| v.active)
                .map(|v| v.name.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_selectable_value(&self, parent: &str, name: &str) -> bool {
        self.find_type(parent).is_some_and(|t| t.active)
            && self.find_value(parent, name).is_some_and(|v| v.active)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub variations: Vec<VariantGroup>,
}

impl Product {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            variations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new()
            .with_type("Size")
            .with_type("Color")
            .with_values("Size", &["S", "M", "L"])
            .with_values("Color", &["Red", "Blue"])
    }

    #[test]
    fn selectable_types_skips_inactive() {
        let mut catalog = sample();
        catalog.find_type_mut("Color").unwrap().active = false;
        assert_eq!(catalog.selectable_types(), vec!["Size"]);
    }

    #[test]
    fn selectable_values_skips_inactive_values() {
        let mut catalog = sample();
        catalog.find_value_mut("Size", "M").unwrap().active = false;
        assert_eq!(catalog.selectable_values("Size"), vec!["S", "L"]);
    }

    #[test]
    fn selectable_values_empty_for_inactive_type() {
        let mut catalog = sample();
        catalog.find_type_mut("Size").unwrap().active = false;
        assert!(catalog.selectable_values("Size").is_empty());
        assert!(!catalog.is_selectable_value("Size", "S"));
    }

    #[test]
    fn selectable_values_accepts_a_borrowed_type_name() {
        let catalog = sample();
        let parent = String::from("Color");
        let names = catalog.selectable_values(&parent);
        assert_eq!(names, vec!["Red", "Blue"]);
    }

    #[test]
    fn values_are_scoped_by_parent() {
        let catalog = sample().with_values("Material", &["S"]);
        assert!(catalog.find_value("Material", "S").is_some());
        assert_eq!(catalog.values_of("Size").count(), 3);
    }

    #[test]
    fn deserializes_with_missing_active_flag() {
        let json = r#"{
            "types": [{"name": "Size", "updated_at": "2024-01-01T00:00:00Z"}],
            "values": [{"name": "S", "parent": "Size", "updated_at": "2024-01-01T00:00:00Z"}]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert!(catalog.types[0].active);
        assert!(catalog.values[0].active);
        assert!(catalog.values[0].color_code.is_none());
    }
}
