use crate::model::Product;

pub fn render_product(product: &Product, favorite: bool) -> String {
    let mut line = format!(
        "{} {} | {} | {}",
        if favorite { "♥" } else { " " },
        product.id,
        product.name,
        product.brand
    );

    if let Some(price) = &product.current_price {
        line.push_str(&format!(" | {}", price));
    }
    if let (Some(original), Some(discount)) = (&product.original_price, &product.discount) {
        line.push_str(&format!(" (was {}, {})", original, discount));
    }
    if let Some(colour) = &product.colour {
        line.push_str(&format!(" | {}", colour));
    }
    line
}

pub fn render_listing<'a, I, F>(summary: &str, products: I, is_favorite: F, has_more: bool) -> String
where
    I: IntoIterator<Item = &'a Product>,
    F: Fn(&str) -> bool,
{
    let mut out = String::from(summary);
    for product in products {
        out.push('\n');
        out.push_str(&render_product(product, is_favorite(&product.id)));
    }
    if has_more {
        out.push_str("\n... type 'more' to load more");
    }
    out
}
