use super::ui;
use crate::core::catalog::Category;
use comfy_table::Cell;

/// Index memberships of one ticker, grouped by category.
pub fn render_ticker_info(ticker: &str, memberships: &[(Category, Vec<(String, String)>)]) -> String {
    let title = ui::style_text(&format!("Information for {ticker}"), ui::StyleType::Title);
    if memberships.iter().all(|(_, indices)| indices.is_empty()) {
        return format!(
            "{}\n\n{}",
            title,
            ui::style_text("No index information found", ui::StyleType::Subtle)
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Code"),
        ui::header_cell("Name"),
    ]);
    for (category, indices) in memberships {
        for (code, name) in indices {
            table.add_row(vec![
                Cell::new(category),
                Cell::new(code),
                Cell::new(name),
            ]);
        }
    }

    format!("{title}\n\n{table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ticker_info() {
        let memberships = vec![
            (
                Category::Market,
                vec![("UTTI".to_string(), "UBMI 10".to_string())],
            ),
            (Category::Strategy, vec![]),
            (
                Category::Theme,
                vec![("THMIDX17".to_string(), "BTC Group".to_string())],
            ),
        ];
        let output = render_ticker_info("KRW-BTC", &memberships);
        assert!(output.contains("Information for KRW-BTC"));
        assert!(output.contains("UBMI 10"));
        assert!(output.contains("theme"));
        assert!(!output.contains("strategy"));
    }

    #[test]
    fn test_render_without_memberships() {
        let memberships = vec![(Category::Market, vec![]), (Category::Sector, vec![])];
        let output = render_ticker_info("KRW-NOPE", &memberships);
        assert!(output.contains("No index information found"));
    }
}
