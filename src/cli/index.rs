use super::ui;
use crate::core::catalog::{self, Category};
use comfy_table::Cell;

fn plural_title(category: Category) -> &'static str {
    match category {
        Category::Market => "Markets",
        Category::Strategy => "Strategies",
        Category::Theme => "Themes",
        Category::Sector => "Sectors",
    }
}

/// Table of every index code of a category with its display name.
pub fn render_listing(category: Category) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for (code, name) in catalog::indices(category) {
        table.add_row(vec![Cell::new(code), Cell::new(name)]);
    }

    format!(
        "Available {}:\n\n{}",
        ui::style_text(plural_title(category), ui::StyleType::Title),
        table
    )
}

/// Ranked tickers of one index.
pub fn render_tickers(category: Category, index: &str, tickers: &[(String, f64)]) -> String {
    if tickers.is_empty() {
        return ui::style_text(
            &format!("No tickers found in {category} {index}"),
            ui::StyleType::Subtle,
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Ticker"),
        ui::header_cell("Ratio"),
    ]);
    for (rank, (ticker, ratio)) in tickers.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(ticker),
            ui::ratio_cell(*ratio),
        ]);
    }

    let title = format!(
        "Tickers in {} {} ({})",
        category,
        index,
        catalog::display_name_of(index, category)
    );
    format!(
        "{}\n\n{}",
        ui::style_text(&title, ui::StyleType::Title),
        table
    )
}

pub fn render_invalid_index(category: Category, index: &str) -> String {
    ui::style_text(
        &format!("Invalid {category} index: {index}"),
        ui::StyleType::Error,
    )
}
