use crate::error::Result;
use crate::types::AuthorRecord;
use std::io::Write;

/// One JSON array holding every record.
pub fn report_json<W: Write>(records: &[AuthorRecord], out: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *out, records)?;
    out.write_all(b"\n")?;
    Ok(())
}

/// One JSON object per line.
pub fn report_json_lines<W: Write>(records: &[AuthorRecord], out: &mut W) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
