use crate::model::{Brand, FilterCriteria, PriceRange, Product, SortOption};
use crate::utils::parse_price;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Case-insensitive substring match on name or description.
/// `query_lower` must already be lowercased.
pub fn matches_search(product: &Product, query_lower: &str) -> bool {
    product.name.to_lowercase().contains(query_lower)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query_lower))
}

pub fn matches_brand(product: &Product, brands: &BTreeSet<Brand>) -> bool {
    brands.is_empty() || brands.contains(&product.brand)
}

pub fn matches_category(product: &Product, categories: &BTreeSet<String>) -> bool {
    categories.is_empty()
        || product
            .category
            .as_ref()
            .is_some_and(|c| categories.contains(c))
}

/// `colours_lower` holds the trimmed, lowercased selections.
pub fn matches_colour(product: &Product, colours_lower: &[String]) -> bool {
    if colours_lower.is_empty() {
        return true;
    }
    let Some(colour) = product.colour.as_deref() else {
        return false;
    };
    let colour = colour.trim().to_lowercase();
    colours_lower.iter().any(|c| *c == colour)
}

/// A price that fails to parse counts as 0 and is only kept when 0 is in range.
pub fn matches_price(product: &Product, range: &PriceRange) -> bool {
    range.contains(parse_price(product.current_price.as_deref()))
}

/// Original price minus current price, or 0 when there is no original price.
pub fn discount_amount(product: &Product) -> f64 {
    match product.original_price.as_deref() {
        Some(original) => parse_price(Some(original)) - parse_price(product.current_price.as_deref()),
        None => 0.0,
    }
}

/// Positions into `products` of the records matching `criteria`, in display order.
///
/// Stages run search, brand, category, colour, price and then sort. All filters
/// are conjunctive, so the stage order only affects how much work later stages do.
pub fn filter_sort_indices(products: &[Product], criteria: &FilterCriteria) -> Vec<usize> {
    let mut result: Vec<usize> = (0..products.len()).collect();

    if !criteria.search.is_empty() {
        let query = criteria.search.to_lowercase();
        result.retain(|&i| matches_search(&products[i], &query));
    }
    result.retain(|&i| matches_brand(&products[i], &criteria.brands));
    result.retain(|&i| matches_category(&products[i], &criteria.categories));

    let colours: Vec<String> = criteria
        .colours
        .iter()
        .map(|c| c.trim().to_lowercase())
        .collect();
    result.retain(|&i| matches_colour(&products[i], &colours));
    result.retain(|&i| matches_price(&products[i], &criteria.price_range));

    sort_indices(products, &mut result, criteria.sort);
    result
}

/// Borrowing form of [`filter_sort_indices`].
pub fn filter_sort<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    filter_sort_indices(products, criteria)
        .into_iter()
        .map(|i| &products[i])
        .collect()
}

/// Stable: equal keys keep their merge order.
fn sort_indices(products: &[Product], indices: &mut Vec<usize>, sort: SortOption) {
    let key: fn(&Product) -> f64 = match sort {
        SortOption::Newest => return,
        SortOption::PriceAsc | SortOption::PriceDesc => |p: &Product| parse_price(p.current_price.as_deref()),
        SortOption::Discount => discount_amount,
    };

    let mut keyed: Vec<(f64, usize)> = indices.iter().map(|&i| (key(&products[i]), i)).collect();
    let by_key = |a: &f64, b: &f64| a.partial_cmp(b).unwrap_or(Ordering::Equal);
    match sort {
        SortOption::PriceAsc => keyed.sort_by(|a, b| by_key(&a.0, &b.0)),
        _ => keyed.sort_by(|a, b| by_key(&b.0, &a.0)),
    }

    *indices = keyed.into_iter().map(|(_, i)| i).collect();
}
