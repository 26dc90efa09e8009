pub mod csv;
pub mod json;
pub mod terminal;

use crate::error::Result;
use crate::types::{AuthorRecord, OutputFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the ranked records in `format` to `output_file`, or stdout when none is given.
pub fn write_report(records: &[AuthorRecord], format: OutputFormat, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            render(records, format, &mut writer, false)?;
            writer.flush()?;
            eprintln!("✓ Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            render(records, format, &mut writer, true)?;
            writer.flush()?;
        }
    }
    Ok(())
}

pub fn render<W: Write>(records: &[AuthorRecord], format: OutputFormat, out: &mut W, styled: bool) -> Result<()> {
    match format {
        OutputFormat::Tabular => terminal::report_tabular(records, out, styled),
        OutputFormat::Csv => csv::report_csv(records, out),
        OutputFormat::Json => json::report_json(records, out),
        OutputFormat::JsonLines => json::report_json_lines(records, out),
    }
}
