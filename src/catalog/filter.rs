//! Name search over a catalog.
//!
//! The filter is pure: it borrows the catalog, never mutates it, and returns a
//! fresh ordered subsequence. Views handed to the presentation layer are
//! always recomputed from the store's catalog rather than kept as a second
//! mutable copy.

use crate::catalog::model::{Catalog, Product};

/// Text shown when a view has no products to render.
pub const NO_PRODUCTS_TEXT: &str = "No Product Found";

/// Return the products whose name contains `query`, ignoring case.
///
/// An empty or whitespace-only query returns the whole catalog in its stored
/// order. Otherwise the query is matched as typed (surrounding spaces are
/// significant) against each lowercased name.
pub fn filter_catalog(catalog: &Catalog, query: &str) -> Catalog {
    if query.trim().is_empty() {
        return catalog.clone();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|product| name_matches(product, &needle))
        .cloned()
        .collect()
}

fn name_matches(product: &Product, lowered_query: &str) -> bool {
    product.name.as_str().to_lowercase().contains(lowered_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from(vec![
            Product::new("Speaker X", 120.5, "file://a.png"),
            Product::new("Cable Y", 9.0, "file://c.png"),
            Product::new("Bookshelf SPEAKER", 300.0, "file://d.png"),
        ])
    }

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_and_blank_queries_return_everything() {
        let catalog = sample();
        assert_eq!(filter_catalog(&catalog, ""), catalog);
        assert_eq!(filter_catalog(&catalog, "   \t"), catalog);
    }

    #[test]
    fn match_is_case_insensitive_and_order_preserving() {
        let catalog = sample();
        let upper = filter_catalog(&catalog, "SPEAKER");
        let lower = filter_catalog(&catalog, "speaker");
        assert_eq!(upper, lower);
        assert_eq!(names(&lower), vec!["Speaker X", "Bookshelf SPEAKER"]);
    }

    #[test]
    fn substring_anywhere_in_name() {
        assert_eq!(names(&filter_catalog(&sample(), "ble")), vec!["Cable Y"]);
        assert!(filter_catalog(&sample(), "turntable").is_empty());
    }

    #[test]
    fn query_spaces_are_significant() {
        assert_eq!(names(&filter_catalog(&sample(), "r x")), vec!["Speaker X"]);
        assert!(filter_catalog(&sample(), " speaker x ").is_empty());
    }

    #[test]
    fn filtering_leaves_source_untouched() {
        let catalog = sample();
        let _ = filter_catalog(&catalog, "cable");
        assert_eq!(catalog.len(), 3);
    }
}
