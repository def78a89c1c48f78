use crate::model::{Brand, ParserError, Product};
use crate::parser::RawProductRow;
use tracing::{debug, warn};

/// Converts parsed rows into products, assigning `"{source}-{row}"` ids.
/// Rows without a name or brand are dropped; the remaining rows keep their
/// original ordinal, so ids stay stable when a neighbouring row is bad.
pub fn normalize_all(rows: Vec<RawProductRow>, source: &str) -> Vec<Product> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(row, raw)| match normalize_row(raw, source, row) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!("Dropping row from {}: {}", source, e);
                None
            }
        })
        .collect()
}

pub fn normalize_row(raw: RawProductRow, source: &str, row: usize) -> Result<Product, ParserError> {
    let name = clean(raw.name).ok_or(ParserError::MissingField { field: "name", row })?;
    let brand = clean(raw.brand)
        .map(|b| Brand::from(b.as_str()))
        .ok_or(ParserError::MissingField { field: "brand", row })?;
    if !brand.is_known() {
        debug!("Row {} of {} has unlisted brand '{}'", row, source, brand);
    }

    Ok(Product {
        id: format!("{}-{}", source, row),
        source: source.to_string(),
        name,
        description: clean(raw.description),
        brand,
        category: clean(raw.category),
        colour: clean(raw.colour),
        current_price: clean(raw.current_price),
        original_price: clean(raw.original_price),
        discount: clean(raw.discount),
        image_url: clean(raw.image_url),
        image_alt: clean(raw.image_alt),
        product_link: clean(raw.product_link),
        swatch_image1: clean(raw.swatch_image1),
        swatch_alt1: clean(raw.swatch_alt1),
        swatch_image2: clean(raw.swatch_image2),
        swatch_alt2: clean(raw.swatch_alt2),
    })
}

/// Trims a cell; blank cells count as absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, brand: &str) -> RawProductRow {
        RawProductRow {
            name: Some(name.to_string()),
            brand: Some(brand.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn assigns_ids_from_source_and_ordinal() {
        let products = normalize_all(vec![raw("A", "Oasis"), raw("B", "Boden")], "matalan");
        assert_eq!(products[0].id, "matalan-0");
        assert_eq!(products[1].id, "matalan-1");
        assert_eq!(products[1].source, "matalan");
    }

    #[test]
    fn drops_rows_missing_required_fields_but_keeps_ordinals() {
        let mut last = raw("D", "Roman");
        last.colour = Some("  Black ".into());
        let rows = vec![raw("A", "Oasis"), raw("  ", "Oasis"), raw("C", ""), last];

        let products = normalize_all(rows, "src");
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["src-0", "src-3"]);
        assert_eq!(products[1].colour.as_deref(), Some("Black"));
    }

    #[test]
    fn resolves_known_and_unknown_brands() {
        let product = normalize_row(raw("A", " Phase Eight "), "s", 0).unwrap();
        assert_eq!(product.brand, Brand::PhaseEight);

        let product = normalize_row(raw("A", "Hobbs"), "s", 0).unwrap();
        assert_eq!(product.brand, Brand::Other("Hobbs".into()));
    }

    #[test]
    fn blank_optional_cells_become_absent() {
        let mut row = raw("A", "Oasis");
        row.swatch_image1 = Some("   ".into());
        row.discount = Some("-30%".into());
        let product = normalize_row(row, "s", 0).unwrap();
        assert_eq!(product.swatch_image1, None);
        assert!(product.swatches().is_empty());
        assert!(!product.has_discount());
    }
}
