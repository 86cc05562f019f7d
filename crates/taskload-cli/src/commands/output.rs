//! Report output shared by `sample` and `diff`

use clap::ValueEnum;
use std::path::PathBuf;
use taskload_core::render::{render_markdown, render_table};
use taskload_core::UtilizationReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One tab-separated line per task
    #[default]
    Table,
    Markdown,
    /// The full report, pretty-printed
    Json,
}

pub fn render(
    report: &UtilizationReport,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Table => render_table(report),
        OutputFormat::Markdown => render_markdown(report),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
    })
}

/// Write to `output` if given, otherwise stdout
pub fn emit(text: &str, output: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(output_path) = output {
        std::fs::write(output_path, text)?;
        eprintln!("Wrote {}", output_path.display());
    } else {
        print!("{}", text);
    }
    Ok(())
}
