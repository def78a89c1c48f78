// Header-driven parsing of retailer CSV exports
use crate::model::ParserError;
use serde::Deserialize;

pub trait Parser {
    fn parse(&self, text: &str) -> Result<Vec<RawProductRow>, ParserError>;
}

/// One CSV row, mapped by header name. Header names are matched exactly;
/// missing columns and empty cells come through as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProductRow {
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub colour: Option<String>,
    pub current_price: Option<String>,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub image_url: Option<String>,
    pub image_alt: Option<String>,
    pub product_link: Option<String>,
    pub swatch_image1: Option<String>,
    pub swatch_alt1: Option<String>,
    pub swatch_image2: Option<String>,
    pub swatch_alt2: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct CsvProductParser;

impl CsvProductParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for CsvProductParser {
    /// Any malformed record fails the whole source.
    fn parse(&self, text: &str) -> Result<Vec<RawProductRow>, ParserError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: RawProductRow = result?;
            rows.push(row);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "name,brand,currentPrice,originalPrice,colour,swatchImage1\n\
        Floral Midi Dress,Oasis,£20.00,£35.00, Blue ,https://img/1.jpg\n\
        Denim Skirt,Boden,£45.00,,,\n";

    #[test]
    fn maps_columns_by_header() {
        let rows = CsvProductParser::new().parse(SAMPLE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name.as_deref(), Some("Floral Midi Dress"));
        assert_eq!(rows[0].current_price.as_deref(), Some("£20.00"));
        assert_eq!(rows[0].swatch_image1.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(rows[1].original_price, None);
        assert_eq!(rows[1].description, None);
    }

    #[test]
    fn short_rows_leave_trailing_fields_absent() {
        let text = "name,brand,category,colour\nTee,Roman\n";
        let rows = CsvProductParser::new().parse(text).unwrap();
        assert_eq!(rows[0].brand.as_deref(), Some("Roman"));
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[0].colour, None);
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let text = "Name,Brand,currentPrice\nTee,Roman,£5.00\n";
        let rows = CsvProductParser::new().parse(text).unwrap();
        assert_eq!(rows[0].name, None);
        assert_eq!(rows[0].brand, None);
        assert_eq!(rows[0].current_price.as_deref(), Some("£5.00"));
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let text = "name,brand,sku\nTee,Roman,X1\n";
        let rows = CsvProductParser::new().parse(text).unwrap();
        assert_eq!(rows[0].name.as_deref(), Some("Tee"));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(CsvProductParser::new().parse("").unwrap().is_empty());
    }
}
