//! # Free-Text Result Ranking
//!
//! Pure ranking for the free-text search path. The catalog collaborator
//! returns fuzzy/substring hits in an unspecified order; the terminal
//! shows only the candidates whose *name* starts with what the operator
//! typed, alphabetically.
//!
//! Prefix filtering applies to free text only - barcode and scale scans
//! go through the resolver's exact-match filter instead and never touch
//! this module.

use crate::types::ProductRef;

/// Filters catalog hits to name-prefix matches and sorts them by name.
///
/// An empty (or whitespace-only) term keeps every candidate, sorted, so
/// the idle terminal can show the full browsable list.
pub fn rank_results(candidates: Vec<ProductRef>, term: &str) -> Vec<ProductRef> {
    let term = term.trim().to_lowercase();

    let mut results: Vec<ProductRef> = if term.is_empty() {
        candidates
    } else {
        candidates
            .into_iter()
            .filter(|p| p.name.to_lowercase().starts_with(&term))
            .collect()
    };

    results.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> ProductRef {
        ProductRef {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            barcode: None,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_prefix_filter_is_case_insensitive() {
        let results = rank_results(
            vec![
                product("1", "Coca-Cola 330ml"),
                product("2", "Diet Coke"),
                product("3", "coconut water"),
            ],
            "coc",
        );

        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        // "Diet Coke" contains but does not start with the term
        assert_eq!(names, vec!["Coca-Cola 330ml", "coconut water"]);
    }

    #[test]
    fn test_empty_term_keeps_everything_sorted() {
        let results = rank_results(
            vec![product("1", "Pepsi"), product("2", "Bananas")],
            "   ",
        );
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bananas", "Pepsi"]);
    }
}
