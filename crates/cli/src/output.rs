//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    /// Whether decorative status lines should be printed
    pub fn is_human(&self) -> bool {
        matches!(self, OutputFormat::Table | OutputFormat::Plain)
    }
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Render a list as a table without printing it
pub fn render_table<T: TableDisplay>(items: &[T]) -> String {
    let mut table = new_table();
    table.set_header(T::headers());
    for item in items {
        table.add_row(item.row());
    }
    table.to_string()
}

fn render_plain<T: TableDisplay>(item: &T) -> String {
    T::headers()
        .iter()
        .zip(item.row())
        .map(|(header, value)| format!("{}: {}", header, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a single item
pub fn print_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", render_table(std::slice::from_ref(item)));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(item).unwrap_or_default());
        }
        OutputFormat::Plain => {
            println!("{}", render_plain(item));
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No items found.");
                return;
            }
            println!("{}", render_table(items));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(items).unwrap_or_default());
        }
        OutputFormat::Plain => {
            if items.is_empty() {
                println!("No items found.");
                return;
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    println!("---");
                }
                println!("{}", render_plain(item));
            }
        }
    }
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✅".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

/// Print warning message
pub fn print_warning(message: &str) {
    println!("⚠️  {}", message.yellow());
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        value: u32,
    }

    impl TableDisplay for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Name", "Value"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.name.to_string(), self.value.to_string()]
        }
    }

    #[test]
    fn test_render_table_contains_cells() {
        let rendered = render_table(&[Row { name: "home", value: 42 }]);
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("home"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn test_render_plain() {
        let rendered = render_plain(&Row { name: "about", value: 7 });
        assert_eq!(rendered, "Name: about\nValue: 7");
    }
}
