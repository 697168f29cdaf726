//! Merges freshly generated combinations with the previous row table.
//!
//! For every combination, the first previous row that carries all of the
//! combination's `(type, value)` pairs donates its `price` and `stock`.
//! Combinations without such a row start at zero. Previous rows whose
//! combination is gone are dropped.
//!
//! Extra attributes on a previous row (from a type that has since been
//! deselected) do not prevent a match, and they are not copied into the new
//! row. A previous row lacking one of the combination's types never matches.
//!
//! Keys are reassigned `1..=N` in generation order.

use crate::table::{Combination, Row};

pub fn run(combinations: &[Combination], previous: &[Row]) -> Vec<Row> {
    let mut carried = 0usize;
    let rows: Vec<Row> = combinations
        .iter()
        .enumerate()
        .map(|(i, combination)| {
            let row = Row::new(i + 1, combination.clone());
            match previous
                .iter()
                .find(|prev| combination.is_matched_by(&prev.attributes))
            {
                Some(prev) => {
                    carried += 1;
                    row.with_inventory(prev.price, prev.stock)
                }
                None => row,
            }
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        previous = previous.len(),
        carried,
        "reconciled variant table"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::generate;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn generate_size_color(colors: &[&str]) -> Vec<Combination> {
        generate::run(vec![
            ("Size", strings(&["S", "M"])),
            ("Color", strings(colors)),
        ])
    }

    fn combo(pairs: &[(&str, &str)]) -> Combination {
        Combination::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn empty_previous_defaults_every_row() {
        let rows = run(&generate_size_color(&["Red", "Blue"]), &[]);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.price == 0.0 && r.stock == 0));
        let keys: Vec<_> = rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![1, 2, 3, 4]);
    }

    #[test]
    fn preserves_inventory_of_surviving_combinations() {
        let previous = vec![
            Row::new(4, combo(&[("Size", "M"), ("Color", "Red")])).with_inventory(12.5, 7),
        ];
        let rows = run(&generate_size_color(&["Red", "Blue", "Green"]), &previous);
        assert_eq!(rows.len(), 6);
        let hit = rows
            .iter()
            .find(|r| r.get("Size") == Some("M") && r.get("Color") == Some("Red"))
            .unwrap();
        assert_eq!(hit.price, 12.5);
        assert_eq!(hit.stock, 7);
        // Key is positional, not carried over.
        assert_eq!(hit.key, 4);
        assert_eq!(rows.iter().filter(|r| r.stock != 0).count(), 1);
    }

    #[test]
    fn drops_rows_whose_combination_disappeared() {
        let previous = vec![
            Row::new(1, combo(&[("Size", "S"), ("Color", "Red")])).with_inventory(5.0, 1),
            Row::new(2, combo(&[("Size", "S"), ("Color", "Blue")])).with_inventory(6.0, 2),
        ];
        let rows = run(&generate_size_color(&["Blue"]), &previous);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.get("Color") == Some("Blue")));
        assert_eq!(rows[0].price, 6.0);
        assert_eq!(rows[1].price, 0.0);
    }

    #[test]
    fn extra_keys_match_but_are_not_carried() {
        let previous = vec![Row::new(
            1,
            combo(&[("Size", "S"), ("Color", "Red"), ("Material", "Wool")]),
        )
        .with_inventory(3.0, 9)];
        let combinations = generate::run(vec![
            ("Size", strings(&["S"])),
            ("Color", strings(&["Red"])),
        ]);
        let rows = run(&combinations, &previous);
        assert_eq!(rows[0].stock, 9);
        assert_eq!(rows[0].get("Material"), None);
        assert_eq!(rows[0].attributes.len(), 2);
    }

    #[test]
    fn rows_missing_a_key_never_match() {
        let previous = vec![Row::new(1, combo(&[("Size", "S")])).with_inventory(3.0, 9)];
        let rows = run(&generate_size_color(&["Red"]), &previous);
        assert!(rows.iter().all(|r| r.stock == 0));
    }

    #[test]
    fn first_matching_row_wins() {
        let previous = vec![
            Row::new(1, combo(&[("Size", "S"), ("Color", "Red")])).with_inventory(1.0, 1),
            Row::new(2, combo(&[("Size", "S"), ("Color", "Red")])).with_inventory(2.0, 2),
        ];
        let rows = run(&generate_size_color(&["Red"]), &previous);
        assert_eq!(rows[0].price, 1.0);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let previous = vec![
            Row::new(9, combo(&[("Size", "M"), ("Color", "Blue")])).with_inventory(4.25, 11),
        ];
        let combinations = generate_size_color(&["Red", "Blue"]);
        let once = run(&combinations, &previous);
        let twice = run(&combinations, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn does_not_mutate_inputs() {
        let previous = vec![Row::new(7, combo(&[("Size", "S"), ("Color", "Red")]))];
        let snapshot = previous.clone();
        let _ = run(&generate_size_color(&["Red"]), &previous);
        assert_eq!(previous, snapshot);
    }
}
