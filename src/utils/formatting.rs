use bigdecimal::BigDecimal;
use chrono::{DateTime, Local, Utc};
use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::{basket::Basket, product::Catalog};

pub const EMPTY_CATALOG_HINT: &str = "No products yet. Fetch the catalog to see what's on sale.";

#[derive(Tabled)]
struct CatalogTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Image")]
    image: String,
}

pub fn format_catalog_table(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return style(EMPTY_CATALOG_HINT).italic().dim().to_string();
    }

    let rows: Vec<CatalogTableRow> = catalog
        .products()
        .iter()
        .map(|product| CatalogTableRow {
            id: product.id.to_string(),
            title: truncate(&product.title, 30),
            price: format!("{}$ only", product.price),
            image: if product.image.is_empty() {
                "-".to_string()
            } else {
                product.image.clone()
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

/// One `Nx Title` line per selected product; empty when nothing is selected.
pub fn format_basket(basket: &Basket) -> String {
    basket
        .lines()
        .map(|(info, quantity)| format!("{}x {}", style(quantity).bold(), info.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_total(total: &BigDecimal) -> String {
    format!("{}: ${}", style("Total").bold(), style(total).green())
}

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
