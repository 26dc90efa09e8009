use crate::error::Result;
use crate::types::AuthorRecord;
use std::io::Write;

pub fn report_csv<W: Write>(records: &[AuthorRecord], out: &mut W) -> Result<()> {
    writeln!(out, "Name,Lines,Commits,Files")?;
    for r in records {
        writeln!(out, "{},{},{},{}", quote(&r.name), r.lines, r.commits, r.files)?;
    }
    Ok(())
}

/// RFC 4180 quoting: only when the field needs it, with inner quotes doubled.
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_rows() {
        let records = vec![
            AuthorRecord { name: "Alice".into(), lines: 8, commits: 1, files: 2 },
            AuthorRecord { name: "Bob".into(), lines: 2, commits: 1, files: 1 },
        ];
        let mut buf = Vec::new();
        report_csv(&records, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Name,Lines,Commits,Files\nAlice,8,1,2\nBob,2,1,1\n");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote("plain name"), "plain name");
        assert_eq!(quote("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
