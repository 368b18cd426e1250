//! Convert command implementation

use colored::Colorize;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::convert::Converter;
use crate::error::Result;
use crate::models::ConversionDisplay;
use crate::output::{self, Row, json::format_json};

/// Generate the collection and environment files for one OpenAPI source
pub async fn run(
    opts: &GlobalOptions,
    source: &str,
    output_dir: &str,
    environments: &[String],
) -> Result<()> {
    eprintln!("{} {}", "Converting".cyan(), source);

    let converter = Converter::new(source, output_dir, environments.to_vec());
    let result = converter.convert().await?;

    match opts.format {
        OutputFormat::Json => println!("{}", format_json(ConversionDisplay::KIND, &result)?),
        OutputFormat::Table => {
            eprintln!(
                "{} Generated {} {} ({} environments)",
                "✓".green(),
                result.title.bold(),
                result.version,
                result.environments.len()
            );
            output::print(&ConversionDisplay::rows(&result), OutputFormat::Table)?;
        }
    }

    Ok(())
}
