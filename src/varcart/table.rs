//! # Table Projection
//!
//! The variant table is a list of [`Row`]s. Each row pairs a [`Combination`]
//! (one value per selected attribute type) with the mutable inventory fields
//! `price` and `stock`.
//!
//! Row keys are positional: `1..=N` in table order, reassigned every time the
//! table is regenerated. They bind a row to a UI line for the lifetime of one
//! table snapshot and must not be stored as identities.
//!
//! Serialized, a row flattens its attributes next to the fields, the way the
//! admin table binds columns:
//!
//! ```text
//! {"key": 1, "Size": "S", "Color": "Red", "price": 0.0, "stock": 0}
//! ```

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::VarcartError;

/// An ordered attribute type → value mapping.
///
/// Pair order follows selection order and drives column order. Equality
/// ignores order: two combinations are equal when they carry the same
/// mapping.
#[derive(Debug, Clone, Default)]
pub struct Combination {
    pairs: Vec<(String, String)>,
}

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut combination = Self::new();
        for (k, v) in pairs {
            combination.insert(k, v);
        }
        combination
    }

    /// Returns a copy extended by one pair. Used while growing partial combinations.
    pub(crate) fn extended(&self, type_name: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.insert(type_name, value);
        next
    }

    /// Sets the value for `type_name`, replacing an existing entry in place.
    pub fn insert(&mut self, type_name: impl Into<String>, value: impl Into<String>) {
        let type_name = type_name.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(t, _)| *t == type_name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((type_name, value)),
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(t, _)| t == type_name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True when `candidate` carries every `(type, value)` pair of `self`.
    /// Extra pairs on the candidate are ignored.
    pub fn is_matched_by(&self, candidate: &Combination) -> bool {
        self.iter().all(|(t, v)| candidate.get(t) == Some(v))
    }
}

impl PartialEq for Combination {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_matched_by(other)
    }
}

impl Eq for Combination {}

impl Serialize for Combination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (t, v) in &self.pairs {
            map.serialize_entry(t, v)?;
        }
        map.end()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(t, v)| format!("{t}:{v}")).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub key: usize,
    #[serde(flatten)]
    pub attributes: Combination,
    pub price: f64,
    pub stock: u64,
}

impl Row {
    pub fn new(key: usize, attributes: Combination) -> Self {
        Self {
            key,
            attributes,
            price: 0.0,
            stock: 0,
        }
    }

    pub fn with_inventory(mut self, price: f64, stock: u64) -> Self {
        self.price = price;
        self.stock = stock;
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&str> {
        self.attributes.get(type_name)
    }
}

/// Row fields serialized next to the attributes. No attribute type may use
/// one of these names, compared case-insensitively.
pub const RESERVED_COLUMNS: [&str; 3] = ["key", "price", "stock"];

pub fn is_reserved_column(name: &str) -> bool {
    RESERVED_COLUMNS
        .iter()
        .any(|c| c.eq_ignore_ascii_case(name.trim()))
}

/// The editable fields of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Price,
    Stock,
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowField::Price => write!(f, "price"),
            RowField::Stock => write!(f, "stock"),
        }
    }
}

impl FromStr for RowField {
    type Err = VarcartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(RowField::Price),
            "stock" => Ok(RowField::Stock),
            other => Err(VarcartError::Api(format!(
                "Unknown row field '{other}' (expected price or stock)"
            ))),
        }
    }
}

/// Clamps a numeric field value: NaN, infinities and negatives become 0.
pub fn sanitize_number(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Reads user-typed numeric text. Anything that does not parse is 0.
pub fn coerce_number(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(sanitize_number)
        .unwrap_or(0.0)
}
