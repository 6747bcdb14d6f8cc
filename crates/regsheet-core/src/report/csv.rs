use std::io;

use super::row::{OutputRow, REPORT_HEADERS};

/// The CSV body record for a row.
///
/// Total money is not emitted in the body even though the header names it;
/// the report has always been produced this way and downstream sheets
/// expect it.
pub fn csv_record(row: &OutputRow) -> [&str; 9] {
    [
        row.order_id.as_str(),
        row.line_item_name.as_str(),
        row.display_name(),
        row.rank.as_str(),
        row.display_patrol(),
        row.emergency_contact.as_str(),
        row.emergency_contact_phone.as_str(),
        row.cell_phone.as_str(),
        row.travel_to_campout.as_str(),
    ]
}

/// Write the header and one record per row
pub fn write_csv<W: io::Write>(writer: W, rows: &[OutputRow]) -> Result<(), csv::Error> {
    // Header and body widths differ, so the writer must not enforce equal lengths
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(REPORT_HEADERS)?;
    for row in rows {
        wtr.write_record(csv_record(row))?;
    }
    wtr.flush()?;
    Ok(())
}
