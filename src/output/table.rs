//! Rounded tables with a row count underneath

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

/// Render rows as a table, or `empty` when there are none.
///
/// A footer spanning the table counts the rows, e.g. `3 assets`.
pub fn format_table<T: Tabled>(rows: &[T], empty: &str, noun: &str) -> String {
    if rows.is_empty() {
        return empty.to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .with(Panel::footer(count_label(rows.len(), noun)));

    table.to_string()
}

/// `1 asset`, `2 assets`
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct Env {
        #[tabled(rename = "UID")]
        uid: String,
        #[tabled(rename = "NAME")]
        name: String,
    }

    fn env(uid: &str, name: &str) -> Env {
        Env {
            uid: uid.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_empty_rows_print_the_given_message() {
        let rows: Vec<Env> = Vec::new();
        assert_eq!(
            format_table(&rows, "No environments.", "environment"),
            "No environments."
        );
    }

    #[test]
    fn test_table_has_headers_rows_and_count() {
        let rows = vec![
            env("env-dev", "Orders API v1 - Dev"),
            env("env-stg", "Orders API v1 - Staging"),
        ];

        let table = format_table(&rows, "", "environment");
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines[0].starts_with('╭'));
        assert!(lines[1].contains("UID") && lines[1].contains("NAME"));
        assert!(table.contains("Orders API v1 - Staging"));
        assert!(lines[lines.len() - 2].contains("2 environments"));
        assert!(lines[lines.len() - 1].starts_with('╰'));
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(1, "asset"), "1 asset");
        assert_eq!(count_label(0, "file"), "0 files");
        assert_eq!(count_label(12, "item"), "12 items");
    }
}
