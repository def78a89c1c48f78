// console/command_handler.rs

use crate::console::render::render_listing;
use crate::model::{Brand, CriteriaPatch, PricePreset, PriceRange, SortOption, ViewMode, KNOWN_BRANDS, KNOWN_CATEGORIES};
use crate::state::{Catalog, Event};
use crate::storage::FavoritesBackend;
use std::collections::BTreeSet;
use tracing::info;

const HELP: &str = "Available commands:\n\
    show - list the visible products\n\
    more - load the next page\n\
    search <text> - search names and descriptions (empty clears)\n\
    brand <name> - toggle a brand (no name clears)\n\
    category <name> - toggle a category (no name clears)\n\
    colour <name> - toggle a colour (no name clears)\n\
    price <preset> | price <min> <max> - presets: show-all, 0-50, 50-100, 100-200, 200-500, 500-1000, 1000-999999\n\
    sort <newest|price-asc|price-desc|discount>\n\
    fav <id> - toggle a favorite\n\
    favorites - switch between catalog and favorites\n\
    reset - clear all filters\n\
    brands | categories | colours - list filter values\n\
    quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Reply(String),
    Quit,
}

/// Handles one console line and returns what to print.
pub fn handle_command<B: FavoritesBackend>(command_text: &str, catalog: &mut Catalog<B>) -> CommandOutcome {
    let command_text = command_text.trim();
    info!("Handling command: {}", command_text);
    let (command, arg) = command_text
        .split_once(char::is_whitespace)
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((command_text, ""));

    let event = match command {
        "" => return CommandOutcome::Reply(String::new()),
        "quit" | "exit" => return CommandOutcome::Quit,
        "help" => return CommandOutcome::Reply(HELP.to_string()),
        "show" => return CommandOutcome::Reply(listing(catalog)),
        "brands" => {
            let names: Vec<&str> = KNOWN_BRANDS.iter().map(|b| b.name()).collect();
            return CommandOutcome::Reply(names.join("\n"));
        }
        "categories" => return CommandOutcome::Reply(KNOWN_CATEGORIES.join("\n")),
        "colours" => return CommandOutcome::Reply(catalog.bounds().unique_colours.join("\n")),
        "more" => Event::NearBottom,
        "favorites" => Event::ToggleFavoritesView,
        "catalog" => Event::ViewModeChanged(ViewMode::Catalog),
        "reset" => Event::ResetFilters,
        "fav" if !arg.is_empty() => Event::FavoriteToggled(arg.to_string()),
        "search" => Event::CriteriaChanged(CriteriaPatch {
            search: Some(arg.to_string()),
            ..Default::default()
        }),
        "brand" => {
            let brands = toggled(&catalog.state().criteria.brands, arg, |a| Brand::from(a));
            Event::CriteriaChanged(CriteriaPatch {
                brands: Some(brands),
                ..Default::default()
            })
        }
        "category" => {
            let categories = toggled(&catalog.state().criteria.categories, arg, str::to_string);
            Event::CriteriaChanged(CriteriaPatch {
                categories: Some(categories),
                ..Default::default()
            })
        }
        "colour" | "color" => {
            let colours = toggled(&catalog.state().criteria.colours, arg, str::to_string);
            Event::CriteriaChanged(CriteriaPatch {
                colours: Some(colours),
                ..Default::default()
            })
        }
        "price" => match parse_price_arg(arg, catalog) {
            Ok(range) => Event::CriteriaChanged(CriteriaPatch {
                price_range: Some(range),
                ..Default::default()
            }),
            Err(e) => return CommandOutcome::Reply(e),
        },
        "sort" if arg.is_empty() => {
            return CommandOutcome::Reply(format!("Sorted by {}", catalog.state().criteria.sort.as_str()));
        }
        "sort" => match arg.parse::<SortOption>() {
            Ok(sort) => Event::CriteriaChanged(CriteriaPatch {
                sort: Some(sort),
                ..Default::default()
            }),
            Err(e) => return CommandOutcome::Reply(e),
        },
        _ => {
            return CommandOutcome::Reply(format!(
                "Unknown command '{}'. Type 'help' for the list.",
                command_text
            ));
        }
    };

    catalog.handle(event);
    CommandOutcome::Reply(listing(catalog))
}

/// Adds `arg` to the selection, removes it if present, or clears everything when empty.
fn toggled<T: Ord + Clone>(current: &BTreeSet<T>, arg: &str, make: impl Fn(&str) -> T) -> BTreeSet<T> {
    if arg.is_empty() {
        return BTreeSet::new();
    }
    let value = make(arg);
    let mut next = current.clone();
    if !next.remove(&value) {
        next.insert(value);
    }
    next
}

fn parse_price_arg<B: FavoritesBackend>(arg: &str, catalog: &Catalog<B>) -> Result<PriceRange, String> {
    if let Ok(preset) = arg.parse::<PricePreset>() {
        return Ok(preset.range(catalog.bounds()));
    }

    let parts: Vec<&str> = arg.split_whitespace().collect();
    match parts.as_slice() {
        [min, max] => {
            let min: f64 = min.parse().map_err(|_| format!("invalid minimum '{}'", min))?;
            let max: f64 = max.parse().map_err(|_| format!("invalid maximum '{}'", max))?;
            Ok(PriceRange::new(min, max))
        }
        _ => Err(format!("unknown price '{}'", arg)),
    }
}

fn listing<B: FavoritesBackend>(catalog: &mut Catalog<B>) -> String {
    let summary = catalog.summary();
    let total = catalog.result_len();
    let has_more =
        catalog.state().view == ViewMode::Catalog && catalog.state().pagination.has_more(total);
    let visible: Vec<_> = catalog.visible().into_iter().cloned().collect();
    render_listing(&summary, &visible, |id| catalog.is_favorite(id), has_more)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesStore;
    use crate::model::Product;
    use crate::storage::MemoryStorage;

    fn product(id: &str, brand: Brand, price: &str) -> Product {
        Product {
            id: id.into(),
            source: "s".into(),
            name: format!("Item {}", id),
            description: None,
            brand,
            category: Some("Dresses".into()),
            colour: Some("Blue".into()),
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

    fn catalog() -> Catalog<MemoryStorage> {
        let mut catalog = Catalog::new(FavoritesStore::load(MemoryStorage::new()), 40);
        catalog.finish_load(vec![
            product("a", Brand::Oasis, "£20.00"),
            product("b", Brand::Boden, "£45.00"),
            product("c", Brand::Oasis, "£10.00"),
        ]);
        catalog
    }

    #[test]
    fn brand_command_toggles_selection() {
        let mut catalog = catalog();
        handle_command("brand Oasis", &mut catalog);
        assert!(catalog.state().criteria.brands.contains(&Brand::Oasis));
        handle_command("brand Oasis", &mut catalog);
        assert!(catalog.state().criteria.brands.is_empty());
    }

    #[test]
    fn sort_and_price_commands_update_criteria() {
        let mut catalog = catalog();
        let reply = handle_command("sort price-asc", &mut catalog);
        assert_eq!(catalog.state().criteria.sort, SortOption::PriceAsc);
        let CommandOutcome::Reply(text) = reply else {
            panic!("expected a reply");
        };
        assert!(text.starts_with("3 products found"));

        handle_command("price 0-50", &mut catalog);
        assert_eq!(catalog.state().criteria.price_range, PriceRange::new(0.0, 50.0));
        handle_command("price 15 30", &mut catalog);
        assert_eq!(catalog.result_len(), 1);

        assert_eq!(
            handle_command("sort", &mut catalog),
            CommandOutcome::Reply("Sorted by price-asc".into())
        );
    }

    #[test]
    fn listing_offers_more_until_the_last_page() {
        let mut catalog = Catalog::new(FavoritesStore::load(MemoryStorage::new()), 2);
        catalog.finish_load(vec![
            product("a", Brand::Oasis, "£20.00"),
            product("b", Brand::Boden, "£45.00"),
            product("c", Brand::Oasis, "£10.00"),
        ]);

        let CommandOutcome::Reply(first) = handle_command("show", &mut catalog) else {
            panic!("expected a reply");
        };
        assert!(first.contains("type 'more'"));

        let CommandOutcome::Reply(second) = handle_command("more", &mut catalog) else {
            panic!("expected a reply");
        };
        assert!(!second.contains("type 'more'"));
        assert_eq!(catalog.visible().len(), 3);
    }

    #[test]
    fn show_all_uses_catalog_bounds() {
        let mut catalog = catalog();
        handle_command("price show-all", &mut catalog);
        assert_eq!(catalog.state().criteria.price_range, PriceRange::new(10.0, 45.0));
    }

    #[test]
    fn bad_arguments_reply_without_changing_state() {
        let mut catalog = catalog();
        let before = catalog.state().clone();
        assert!(matches!(handle_command("sort cheapest", &mut catalog), CommandOutcome::Reply(_)));
        assert!(matches!(handle_command("price lots", &mut catalog), CommandOutcome::Reply(_)));
        assert_eq!(catalog.state(), &before);
    }

    #[test]
    fn quit_and_favorites() {
        let mut catalog = catalog();
        handle_command("fav b", &mut catalog);
        handle_command("favorites", &mut catalog);
        assert_eq!(catalog.summary(), "1 products found in favorites");
        assert_eq!(handle_command("quit", &mut catalog), CommandOutcome::Quit);
    }
}
