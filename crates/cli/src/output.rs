//! Result output: one JSON object per line on stdout.

use pandora_client::FlatRecord;
use std::io::Write;

/// Write the first record, or every record when `all` is set.
///
/// Nothing is written for an empty result.
pub fn write_records<W: Write>(out: &mut W, records: &[FlatRecord], all: bool) -> anyhow::Result<()> {
    let selected = if all { records } else { &records[..records.len().min(1)] };
    for record in selected {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
