use crate::error::Result;
use crate::types::AuthorRecord;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, Table};
use std::io::Write;

/// Human-readable table: Name | Lines | Commits | Files.
/// `styled` is false when the table goes to a file so no ANSI codes leak in.
pub fn report_tabular<W: Write>(records: &[AuthorRecord], out: &mut W, styled: bool) -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if !styled {
        table.force_no_tty();
    }
    table.set_header(vec![
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Lines").add_attribute(Attribute::Bold),
        Cell::new("Commits").add_attribute(Attribute::Bold),
        Cell::new("Files").add_attribute(Attribute::Bold),
    ]);

    for r in records {
        table.add_row(vec![
            Cell::new(&r.name),
            number_cell(r.lines),
            number_cell(r.commits),
            number_cell(r.files),
        ]);
    }

    writeln!(out, "{table}")?;
    Ok(())
}

fn number_cell(n: usize) -> Cell {
    Cell::new(n).set_alignment(CellAlignment::Right)
}
