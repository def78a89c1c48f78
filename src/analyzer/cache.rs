use crate::analyzer::query::filter_sort_indices;
use crate::model::{FilterCriteria, Product};
use tracing::debug;

/// Remembers the last query result, keyed on the exact criteria.
/// Must be invalidated whenever the product collection changes.
#[derive(Debug, Default)]
pub struct QueryCache {
    entry: Option<(FilterCriteria, Vec<usize>)>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, products: &[Product], criteria: &FilterCriteria) -> &[usize] {
        let fresh = matches!(&self.entry, Some((cached, _)) if cached == criteria);
        if !fresh {
            let result = filter_sort_indices(products, criteria);
            debug!("Recomputed query: {} of {} products", result.len(), products.len());
            self.entry = Some((criteria.clone(), result));
        }

        self.entry.as_ref().map(|(_, r)| r.as_slice()).unwrap_or_default()
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Brand, SortOption};

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: id.into(),
            source: "s".into(),
            name: id.into(),
            description: None,
            brand: Brand::Oasis,
            category: None,
            colour: None,
            current_price: Some(price.into()),
            original_price: None,
            discount: None,
            image_url: None,
            image_alt: None,
            product_link: None,
            swatch_image1: None,
            swatch_alt1: None,
            swatch_image2: None,
            swatch_alt2: None,
        }
    }

    #[test]
    fn recomputes_only_when_criteria_change() {
        let products = vec![product("a", "£5"), product("b", "£1")];
        let mut cache = QueryCache::new();
        let criteria = FilterCriteria::default();
        assert_eq!(cache.get_or_compute(&products, &criteria), &[0, 1]);

        let sorted = FilterCriteria {
            sort: SortOption::PriceAsc,
            ..Default::default()
        };
        assert_eq!(cache.get_or_compute(&products, &sorted), &[1, 0]);
        assert_eq!(cache.get_or_compute(&products, &sorted), &[1, 0]);
    }

    #[test]
    fn invalidate_forces_recompute_for_new_products() {
        let mut cache = QueryCache::new();
        let criteria = FilterCriteria::default();
        assert_eq!(cache.get_or_compute(&[product("a", "£1")], &criteria).len(), 1);

        cache.invalidate();
        let more = vec![product("a", "£1"), product("b", "£2")];
        assert_eq!(cache.get_or_compute(&more, &criteria).len(), 2);
    }
}
