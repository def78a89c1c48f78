// Core structs: Product, Brand, FilterCriteria and the error types shared by the pipeline
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Brands the filter panel knows about. Anything else is kept as `Brand::Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Brand {
    DorothyPerkins,
    Oasis,
    PixieGirl,
    RiverIsland,
    Roman,
    Papaya,
    Boden,
    Lovall,
    PhaseEight,
    Whistles,
    WhiteStuff,
    Relr,
    NeverFullyDressed,
    Boohoo,
    MAndCo,
    Other(String),
}

pub static KNOWN_BRANDS: [Brand; 15] = [
    Brand::DorothyPerkins,
    Brand::Oasis,
    Brand::PixieGirl,
    Brand::RiverIsland,
    Brand::Roman,
    Brand::Papaya,
    Brand::Boden,
    Brand::Lovall,
    Brand::PhaseEight,
    Brand::Whistles,
    Brand::WhiteStuff,
    Brand::Relr,
    Brand::NeverFullyDressed,
    Brand::Boohoo,
    Brand::MAndCo,
];

pub const KNOWN_CATEGORIES: [&str; 18] = [
    "Tops",
    "Knitwear",
    "Cardigans",
    "Dresses",
    "Skirts",
    "Jumpsuits & Playsuits",
    "Dungarees",
    "Hoodies",
    "Shorts",
    "Skorts",
    "Trousers",
    "Jeans",
    "Leggings & Jeggings",
    "Blazers",
    "Coats & Jackets",
    "Swimwear",
    "Nightwear & Loungewear",
    "Lingerie",
];

impl Brand {
    pub fn name(&self) -> &str {
        match self {
            Brand::DorothyPerkins => "Dorothy Perkins",
            Brand::Oasis => "Oasis",
            Brand::PixieGirl => "Pixie Girl",
            Brand::RiverIsland => "River Island",
            Brand::Roman => "Roman",
            Brand::Papaya => "Papaya",
            Brand::Boden => "Boden",
            Brand::Lovall => "Lovall",
            Brand::PhaseEight => "Phase Eight",
            Brand::Whistles => "Whistles",
            Brand::WhiteStuff => "White Stuff",
            Brand::Relr => "RELR",
            Brand::NeverFullyDressed => "Never Fully Dressed",
            Brand::Boohoo => "BOOHOO",
            Brand::MAndCo => "M&Co",
            Brand::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Brand::Other(_))
    }
}

impl From<&str> for Brand {
    fn from(name: &str) -> Self {
        KNOWN_BRANDS
            .iter()
            .find(|b| b.name() == name)
            .cloned()
            .unwrap_or_else(|| Brand::Other(name.to_string()))
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog entry. Built once per ingestion run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub source: String,
    pub name: String,
    pub description: Option<String>,
    pub brand: Brand,
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

impl Product {
    /// The card only shows a discount badge when both the label and the old price exist.
    pub fn has_discount(&self) -> bool {
        self.discount.is_some() && self.original_price.is_some()
    }

    /// Swatches that have an image, paired with their alt text.
    pub fn swatches(&self) -> Vec<(&str, Option<&str>)> {
        [
            (&self.swatch_image1, &self.swatch_alt1),
            (&self.swatch_image2, &self.swatch_alt2),
        ]
        .into_iter()
        .filter_map(|(image, alt)| image.as_deref().map(|i| (i, alt.as_deref())))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Discount,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Discount => "discount",
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOption::Newest),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "discount" => Ok(SortOption::Discount),
            other => Err(format!("unknown sort option '{}'", other)),
        }
    }
}

/// Inclusive price range in pounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, 1000.0)
    }
}

/// The fixed price choices offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePreset {
    ShowAll,
    Under50,
    From50To100,
    From100To200,
    From200To500,
    From500To1000,
    Over1000,
}

impl PricePreset {
    pub fn range(&self, bounds: &CatalogBounds) -> PriceRange {
        match self {
            PricePreset::ShowAll => PriceRange::new(bounds.min_price, bounds.max_price),
            PricePreset::Under50 => PriceRange::new(0.0, 50.0),
            PricePreset::From50To100 => PriceRange::new(50.0, 100.0),
            PricePreset::From100To200 => PriceRange::new(100.0, 200.0),
            PricePreset::From200To500 => PriceRange::new(200.0, 500.0),
            PricePreset::From500To1000 => PriceRange::new(500.0, 1000.0),
            PricePreset::Over1000 => PriceRange::new(1000.0, 999_999.0),
        }
    }
}

impl FromStr for PricePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show-all" => Ok(PricePreset::ShowAll),
            "0-50" => Ok(PricePreset::Under50),
            "50-100" => Ok(PricePreset::From50To100),
            "100-200" => Ok(PricePreset::From100To200),
            "200-500" => Ok(PricePreset::From200To500),
            "500-1000" => Ok(PricePreset::From500To1000),
            "1000-999999" => Ok(PricePreset::Over1000),
            other => Err(format!("unknown price preset '{}'", other)),
        }
    }
}

/// Values derived from the whole merged collection, not the filtered subset.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogBounds {
    pub min_price: f64,
    pub max_price: f64,
    pub unique_colours: Vec<String>,
}

impl Default for CatalogBounds {
    fn default() -> Self {
        Self {
            min_price: 0.0,
            max_price: 1000.0,
            unique_colours: Vec::new(),
        }
    }
}

/// Full tuple of search, filter and sort selections at a point in time.
/// Empty selection sets mean "no restriction".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub brands: BTreeSet<Brand>,
    pub categories: BTreeSet<String>,
    pub colours: BTreeSet<String>,
    pub price_range: PriceRange,
    pub sort: SortOption,
}

impl FilterCriteria {
    pub fn apply(mut self, patch: CriteriaPatch) -> Self {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(brands) = patch.brands {
            self.brands = brands;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(colours) = patch.colours {
            self.colours = colours;
        }
        if let Some(range) = patch.price_range {
            self.price_range = range;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
        self
    }

    /// Clears every selection except the search text and sort order.
    pub fn cleared_selections(self) -> Self {
        Self {
            search: self.search,
            sort: self.sort,
            ..Self::default()
        }
    }
}

/// Partial criteria update; `None` leaves the current value untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaPatch {
    pub search: Option<String>,
    pub brands: Option<BTreeSet<Brand>>,
    pub categories: Option<BTreeSet<String>>,
    pub colours: Option<BTreeSet<String>>,
    pub price_range: Option<PriceRange>,
    pub sort: Option<SortOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Catalog,
    Favorites,
}

/// Where one retailer export lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Http(String),
}

impl SourceLocation {
    /// Last path segment, used to derive the per-source id discriminator.
    pub fn file_name(&self) -> String {
        match self {
            SourceLocation::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            SourceLocation::Http(url) => url
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Http(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error reading {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {status} for {location}")]
    Status { location: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required field '{field}' in row {row}")]
    MissingField { field: &'static str, row: usize },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
