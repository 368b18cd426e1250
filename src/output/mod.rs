//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// A display row and the wording printed around a list of them
pub trait Row: Tabled + Serialize {
    /// `meta.kind` in JSON output
    const KIND: &'static str;

    /// Singular noun for the table footer count
    const NOUN: &'static str;

    /// Printed instead of an empty table
    const EMPTY: &'static str = "No results found.";
}

/// Trait for types that can be formatted for output
pub trait Formattable {
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl<T: Row> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self, T::EMPTY, T::NOUN)),
            OutputFormat::Json => Ok(json::format_json_list(T::KIND, self)?),
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}
