//! CSV serialization of exported detail rows

use std::path::Path;

use super::error::Result;

/// Serialize a header row followed by the data rows as CSV bytes.
///
/// Fields containing the separator, a quote or a newline are quoted, with
/// internal quotes doubled.
pub fn serialize<H, R>(header: &[H], rows: &[R]) -> Result<Vec<u8>>
where
    H: AsRef<[u8]>,
    R: AsRef<[String]>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(false)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.as_ref())?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Serialize and write the CSV to `path`, replacing any existing file.
pub fn write_csv<H, R>(path: &Path, header: &[H], rows: &[R]) -> Result<()>
where
    H: AsRef<[u8]>,
    R: AsRef<[String]>,
{
    let bytes = serialize(header, rows)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
