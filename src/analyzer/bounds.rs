use crate::model::{CatalogBounds, Product};
use crate::utils::parse_price;
use std::collections::BTreeSet;

/// Price bounds and the colour list for the filter panel, computed over the
/// whole merged collection. An empty collection yields the default `0..=1000`.
pub fn derive_bounds(products: &[Product]) -> CatalogBounds {
    if products.is_empty() {
        return CatalogBounds::default();
    }

    let prices = products
        .iter()
        .map(|p| parse_price(p.current_price.as_deref()));
    let (min_price, max_price) = prices.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });

    let unique_colours: BTreeSet<String> = products
        .iter()
        .filter_map(|p| p.colour.as_deref())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    CatalogBounds {
        min_price,
        max_price,
        unique_colours: unique_colours.into_iter().collect(),
    }
}
