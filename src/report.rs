use crate::table_scraper::TableRow;

/// Two-column listing of `rows` as printed to the console.
pub fn render_table(title: &str, rows: &[TableRow]) -> String {
    let mut lines = vec![
        format!("\n--- {title} Table Data ---"),
        format!("{:<4} | Name", "ID"),
        "-----|------".to_string(),
    ];
    lines.extend(rows.iter().map(|row| format!("{:<4} | {}", row.id, row.name)));
    lines.join("\n") + "\n"
}
