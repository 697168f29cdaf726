//! Editing a single row's price or stock.
//!
//! Field edits never regenerate or reconcile; only the addressed row changes
//! and every key stays where it was. Out-of-range input is coerced rather
//! than rejected: NaN, infinities and negatives become 0, and stock is
//! truncated to a whole number.

use crate::error::{Result, VarcartError};
use crate::table::{coerce_number, sanitize_number, Row, RowField};

pub fn set_field(rows: &[Row], key: usize, field: RowField, value: f64) -> Result<Vec<Row>> {
    if !rows.iter().any(|r| r.key == key) {
        return Err(VarcartError::RowNotFound(key));
    }

    let value = sanitize_number(value);
    Ok(rows
        .iter()
        .map(|row| {
            if row.key != key {
                return row.clone();
            }
            let mut row = row.clone();
            match field {
                RowField::Price => row.price = value,
                RowField::Stock => row.stock = value.trunc() as u64,
            }
            row
        })
        .collect())
}

/// Same as [`set_field`], for raw user-typed text. Unparseable text is 0.
pub fn set_field_input(rows: &[Row], key: usize, field: RowField, input: &str) -> Result<Vec<Row>> {
    set_field(rows, key, field, coerce_number(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Combination;

    fn rows() -> Vec<Row> {
        vec![
            Row::new(1, Combination::from_pairs([("Size", "S")])),
            Row::new(2, Combination::from_pairs([("Size", "M")])).with_inventory(4.0, 2),
        ]
    }

    #[test]
    fn updates_only_the_target_row() {
        let out = set_field(&rows(), 2, RowField::Price, 19.99).unwrap();
        assert_eq!(out[1].price, 19.99);
        assert_eq!(out[1].stock, 2);
        assert_eq!(out[0], rows()[0]);
        let keys: Vec<_> = out.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn stock_is_truncated() {
        let out = set_field(&rows(), 1, RowField::Stock, 15.9).unwrap();
        assert_eq!(out[0].stock, 15);
    }

    #[test]
    fn invalid_numbers_become_zero() {
        let out = set_field(&rows(), 2, RowField::Price, f64::NAN).unwrap();
        assert_eq!(out[1].price, 0.0);
        let out = set_field(&rows(), 2, RowField::Stock, -3.0).unwrap();
        assert_eq!(out[1].stock, 0);
        let out = set_field(&rows(), 2, RowField::Price, f64::INFINITY).unwrap();
        assert_eq!(out[1].price, 0.0);
    }

    #[test]
    fn text_input_is_coerced() {
        let out = set_field_input(&rows(), 2, RowField::Stock, "twelve").unwrap();
        assert_eq!(out[1].stock, 0);
        let out = set_field_input(&rows(), 1, RowField::Price, "8.75").unwrap();
        assert_eq!(out[0].price, 8.75);
    }

    #[test]
    fn unknown_key_is_an_error() {
        let err = set_field(&rows(), 3, RowField::Price, 1.0).unwrap_err();
        assert!(matches!(err, VarcartError::RowNotFound(3)));
    }

    #[test]
    fn input_rows_are_untouched() {
        let original = rows();
        let _ = set_field(&original, 1, RowField::Price, 5.0).unwrap();
        assert_eq!(original, rows());
    }
}
