use super::ui;
use crate::core::RefreshReport;

pub fn render_report(report: &RefreshReport) -> String {
    let mut output = format!(
        "Index data refreshed for {}: {} fetched, {} empty, {} failed",
        report.cache_date,
        report.fetched,
        report.empty.len(),
        report.failed.len()
    );
    for (code, reason) in &report.failed {
        output.push_str(&format!(
            "\n  - {}: {}",
            code,
            ui::style_text(reason, ui::StyleType::Error)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_report_lists_failures() {
        let report = RefreshReport {
            cache_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            fetched: 47,
            empty: vec!["UBAI_ST".to_string()],
            failed: vec![("UTHI".to_string(), "timed out".to_string())],
        };
        let output = render_report(&report);
        assert!(output.contains("2026-10-18: 47 fetched, 1 empty, 1 failed"));
        assert!(output.contains("UTHI"));
        assert!(output.contains("timed out"));
    }
}
