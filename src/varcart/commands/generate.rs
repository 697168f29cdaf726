//! Cartesian product of selected attribute values.
//!
//! Starting from a single empty partial combination, each factor extends every
//! partial by each of its values. The first factor is therefore the outermost
//! loop:
//!
//! ```text
//! Size [S, M] x Color [Red, Blue]
//!   -> {S, Red} {S, Blue} {M, Red} {M, Blue}
//! ```
//!
//! A factor with no values empties the whole product. No factors at all also
//! yields nothing (not a single empty combination).

use crate::selection::SelectionState;
use crate::table::Combination;

pub fn run<'a, I, V>(factors: I) -> Vec<Combination>
where
    I: IntoIterator<Item = (&'a str, V)>,
    V: AsRef<[String]>,
{
    let mut partials = vec![Combination::new()];
    let mut any_factor = false;

    for (type_name, values) in factors {
        any_factor = true;
        let values = values.as_ref();
        partials = partials
            .iter()
            .flat_map(|partial| values.iter().map(move |v| partial.extended(type_name, v)))
            .collect();
        if partials.is_empty() {
            break;
        }
    }

    if !any_factor {
        return Vec::new();
    }
    tracing::debug!(combinations = partials.len(), "generated combinations");
    partials
}

/// Generates the combinations for every selected type of `selection`.
pub fn from_selection(selection: &SelectionState) -> Vec<Combination> {
    run(selection.factors())
}
